//! PDF text extraction
//!
//! Wraps pdf-extract behind the `document` cargo feature. Parse failures,
//! extraction panics (the crate can panic on malformed fonts), and a missing
//! capability all degrade to an empty string; the evidence assembler turns
//! that into the scanned-document placeholder. A scanned, image-only PDF is
//! indistinguishable from a corrupt one at this layer.

use crate::text::truncate_chars;

/// Whether PDF text extraction is compiled into this deployment.
pub fn supported() -> bool {
    cfg!(feature = "document")
}

/// Extract text from at most `max_pages` pages, joined with blank lines,
/// trimmed, and truncated to `max_chars`. Never fails: any unreadable or
/// textless document yields an empty string.
#[cfg(feature = "document")]
pub fn extract_pdf_text(data: &[u8], max_pages: usize, max_chars: usize) -> String {
    let pages = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    })) {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "PDF text extraction failed");
            return String::new();
        }
        Err(_) => {
            tracing::warn!("PDF text extraction panicked, treating document as unreadable");
            return String::new();
        }
    };

    let joined = pages
        .iter()
        .take(max_pages)
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    truncate_chars(joined.trim(), max_chars)
}

#[cfg(not(feature = "document"))]
pub fn extract_pdf_text(_data: &[u8], _max_pages: usize, _max_chars: usize) -> String {
    String::new()
}
