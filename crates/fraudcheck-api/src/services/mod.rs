//! Collaborator clients
//!
//! The two external collaborators (multimodal analysis, email delivery) sit
//! behind traits so the submit handler can be exercised with fakes.

pub mod analysis;
pub mod email;

pub use analysis::{AnalysisClient, AnalysisError, AnalysisRequest, OpenAiAnalysis};
pub use email::{build_analyst_html, EmailAttachment, Mailer, OutboundEmail, SmtpMailer};
