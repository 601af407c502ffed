//! Fraudcheck Processing Library
//!
//! The per-submission evidence pipeline: classify each uploaded file, route it
//! to the matching extraction strategy (plain text decode, PDF text extraction,
//! or pass-through as an inline image), and assemble a bounded prompt payload
//! plus the outbound attachment list. Everything here is pure and infallible
//! at the per-file level: extraction that yields nothing degrades to a
//! placeholder block instead of propagating an error.

pub mod classify;
pub mod evidence;
pub mod pdf;
pub mod prompt;
pub mod text;

// Re-export commonly used types
pub use classify::{classify, resolve_content_type, MediaKind};
pub use evidence::{assemble, EvidenceBundle, ExtractionLimits, InlineImage, TextBlock, UploadedFile};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
