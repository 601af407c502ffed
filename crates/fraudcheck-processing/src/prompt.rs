//! Analysis prompt assembly
//!
//! Builds the single bounded text payload sent to the analysis collaborator.
//! The requested output shape and the submission metadata come first so that
//! the trailing truncation can only ever drop evidence text, never the
//! instructions.

use fraudcheck_core::SubmissionMeta;

use crate::evidence::EvidenceBundle;
use crate::text::truncate_chars;

/// Fixed role instruction, sent as the system message.
pub const SYSTEM_PROMPT: &str = "You are a fraud risk analyst. You review transaction \
     communications and supporting documents submitted by potential fraud victims and produce a \
     concise, actionable risk assessment.";

const NOT_PROVIDED: &str = "(not provided)";

/// Assemble the user prompt: instructions, metadata, then the tagged evidence
/// text blocks. The total is truncated to `max_chars` after concatenation so
/// no single file can starve the others.
pub fn build_prompt(meta: &SubmissionMeta, bundle: &EvidenceBundle, max_chars: usize) -> String {
    let mut prompt = String::new();

    prompt.push_str("Analyze the following transaction communication for fraud risk.\n\n");
    prompt.push_str("Provide:\n");
    prompt.push_str("- Risk Level (Low, Moderate, High)\n");
    prompt.push_str("- Key Findings (bullets)\n");
    prompt.push_str("- Short Assessment\n");
    prompt.push_str("- Recommendation\n\n");

    prompt.push_str(&format!("Transaction Type: {}\n", meta.transaction_type));
    prompt.push_str(&format!(
        "Description: {}\n",
        meta.description().unwrap_or(NOT_PROVIDED)
    ));
    prompt.push_str(&format!(
        "Client Name: {}\n",
        meta.client().unwrap_or(NOT_PROVIDED)
    ));
    prompt.push_str(&format!("User Contact Email: {}\n", meta.contact_email));

    if !bundle.images.is_empty() {
        prompt.push_str(&format!(
            "\n{} image attachment(s) are included for visual review.\n",
            bundle.images.len()
        ));
    }

    prompt.push_str("\nContent:\n");
    for block in &bundle.text_blocks {
        prompt.push_str(&format!("\n[{}]\n{}\n", block.tag, block.body));
    }

    truncate_chars(&prompt, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{assemble, ExtractionLimits, UploadedFile};
    use bytes::Bytes;

    fn meta() -> SubmissionMeta {
        SubmissionMeta {
            transaction_type: "wire transfer".to_string(),
            contact_email: "victim@example.com".to_string(),
            short_description: String::new(),
            client_name: None,
        }
    }

    fn bundle_with_text(body: &[u8]) -> EvidenceBundle {
        assemble(
            vec![UploadedFile::new(
                "chat.txt".to_string(),
                Some("text/plain".to_string()),
                Bytes::copy_from_slice(body),
            )],
            ExtractionLimits::default(),
        )
    }

    #[test]
    fn empty_optional_fields_get_placeholders() {
        let prompt = build_prompt(&meta(), &EvidenceBundle::default(), 16_000);
        assert!(prompt.contains("Description: (not provided)"));
        assert!(prompt.contains("Client Name: (not provided)"));
        assert!(prompt.contains("Transaction Type: wire transfer"));
    }

    #[test]
    fn evidence_blocks_appear_tagged() {
        let prompt = build_prompt(&meta(), &bundle_with_text(b"send gift cards"), 16_000);
        assert!(prompt.contains("[TEXT (chat.txt)]"));
        assert!(prompt.contains("send gift cards"));
    }

    #[test]
    fn prompt_length_never_exceeds_cap() {
        let big = "y".repeat(200_000);
        let bundle = assemble(
            vec![UploadedFile::new(
                "big.txt".to_string(),
                None,
                Bytes::from(big.into_bytes()),
            )],
            ExtractionLimits {
                text_max_chars: 100_000,
                ..Default::default()
            },
        );
        let prompt = build_prompt(&meta(), &bundle, 16_000);
        assert!(prompt.chars().count() <= 16_000);
    }

    #[test]
    fn truncation_preserves_instructions() {
        let bundle = bundle_with_text("z".repeat(50_000).as_bytes());
        let prompt = build_prompt(&meta(), &bundle, 2_000);
        // Instructions and metadata precede the evidence, so the cap only
        // drops trailing evidence text.
        assert!(prompt.contains("Risk Level (Low, Moderate, High)"));
        assert!(prompt.contains("User Contact Email: victim@example.com"));
    }

    #[test]
    fn image_count_is_announced() {
        let bundle = assemble(
            vec![UploadedFile::new(
                "shot.png".to_string(),
                Some("image/png".to_string()),
                Bytes::from_static(b"png"),
            )],
            ExtractionLimits::default(),
        );
        let prompt = build_prompt(&meta(), &bundle, 16_000);
        assert!(prompt.contains("1 image attachment(s)"));
    }
}
