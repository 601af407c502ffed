//! Submission models
//!
//! A submission lives only for the duration of its request: it is built from
//! the multipart form, consumed by the evidence pipeline and the two
//! collaborator calls, and discarded once the response is sent. Nothing here
//! is persisted.

use serde::{Deserialize, Serialize};

/// User-supplied form metadata accompanying the uploaded files.
///
/// All fields are free text and unvalidated beyond presence: the contact email
/// is whatever the submitter typed, and the optional fields default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionMeta {
    pub transaction_type: String,
    pub contact_email: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub client_name: Option<String>,
}

impl SubmissionMeta {
    /// Short description, or `None` when blank.
    pub fn description(&self) -> Option<&str> {
        let trimmed = self.short_description.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Client name, or `None` when blank.
    pub fn client(&self) -> Option<&str> {
        self.client_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
