//! Evidence assembly
//!
//! Walks the uploaded files in submission order and produces the two parallel
//! outputs of a submission: tagged text blocks plus inline images for the
//! analysis prompt, and the attachment list for the analyst email. Extraction
//! outcome never decides attachment membership, and no per-file failure aborts
//! the walk.

use bytes::Bytes;

use crate::classify::{classify, resolve_content_type, MediaKind};
use crate::{pdf, text};

/// One submitted file, with its routing decision cached at construction.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    /// Client-declared content type, untrusted, kept for diagnostics.
    pub declared_content_type: Option<String>,
    /// Resolved MIME type used for both the inline image payload and the
    /// outbound attachment.
    pub content_type: String,
    pub kind: MediaKind,
    pub data: Bytes,
}

impl UploadedFile {
    /// Classify once and cache the result; every later consumer reads the
    /// cached kind and MIME instead of re-deriving them.
    pub fn new(filename: String, declared_content_type: Option<String>, data: Bytes) -> Self {
        let kind = classify(&filename, declared_content_type.as_deref());
        let content_type = resolve_content_type(&filename, declared_content_type.as_deref());
        Self {
            filename,
            declared_content_type,
            content_type,
            kind,
            data,
        }
    }
}

/// A tagged block of extracted (or placeholder) text.
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// e.g. `PDF TEXT (statement.pdf)` or `FILE (dump.bin)`
    pub tag: String,
    pub body: String,
}

/// An image passed through for multimodal analysis.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub content_type: String,
    pub data: Bytes,
}

/// Per-file extraction bounds, taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionLimits {
    pub text_max_chars: usize,
    pub pdf_max_pages: usize,
    pub pdf_max_chars: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            text_max_chars: 12_000,
            pdf_max_pages: 10,
            pdf_max_chars: 20_000,
        }
    }
}

/// The per-submission derived aggregate: text blocks and inline images feed
/// the analysis prompt, `files` feeds the email attachment list.
#[derive(Debug, Default)]
pub struct EvidenceBundle {
    pub text_blocks: Vec<TextBlock>,
    pub images: Vec<InlineImage>,
    pub files: Vec<UploadedFile>,
}

const SCANNED_PDF_PLACEHOLDER: &str = "No machine-readable text could be extracted from this \
     PDF. The document is likely a scanned image; re-submit the pages as images so they can be \
     reviewed visually.";

const UNREADABLE_FILE_PLACEHOLDER: &str =
    "The file content is binary or otherwise unreadable; no text could be extracted.";

/// Assemble the evidence bundle for one submission.
///
/// Files are processed in submission order. Images skip text extraction
/// entirely and are inlined byte-for-byte; PDFs and generic files that yield
/// no text produce an explanatory placeholder block so neither the model nor
/// the analyst sees silence.
pub fn assemble(files: Vec<UploadedFile>, limits: ExtractionLimits) -> EvidenceBundle {
    let mut bundle = EvidenceBundle::default();

    for file in &files {
        match file.kind {
            MediaKind::Image => {
                bundle.images.push(InlineImage {
                    content_type: file.content_type.clone(),
                    data: file.data.clone(),
                });
            }
            MediaKind::Pdf => {
                let extracted =
                    pdf::extract_pdf_text(&file.data, limits.pdf_max_pages, limits.pdf_max_chars);
                if extracted.is_empty() {
                    tracing::debug!(filename = %file.filename, "PDF yielded no text, using placeholder");
                    bundle.text_blocks.push(TextBlock {
                        tag: format!("PDF ({})", file.filename),
                        body: SCANNED_PDF_PLACEHOLDER.to_string(),
                    });
                } else {
                    bundle.text_blocks.push(TextBlock {
                        tag: format!("PDF TEXT ({})", file.filename),
                        body: extracted,
                    });
                }
            }
            MediaKind::Generic => {
                let extracted = text::extract_text(&file.data, limits.text_max_chars);
                if extracted.is_empty() {
                    tracing::debug!(filename = %file.filename, "file yielded no text, using placeholder");
                    bundle.text_blocks.push(TextBlock {
                        tag: format!("FILE ({})", file.filename),
                        body: UNREADABLE_FILE_PLACEHOLDER.to_string(),
                    });
                } else {
                    bundle.text_blocks.push(TextBlock {
                        tag: format!("TEXT ({})", file.filename),
                        body: extracted,
                    });
                }
            }
        }
    }

    tracing::debug!(
        files = files.len(),
        text_blocks = bundle.text_blocks.len(),
        images = bundle.images.len(),
        "Evidence bundle assembled"
    );

    bundle.files = files;
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: Option<&str>, data: &[u8]) -> UploadedFile {
        UploadedFile::new(
            name.to_string(),
            content_type.map(str::to_string),
            Bytes::copy_from_slice(data),
        )
    }

    #[test]
    fn single_image_submission() {
        let png = b"\x89PNG\r\n\x1a\nfakepixels";
        let bundle = assemble(
            vec![file("receipt.png", Some("image/png"), png)],
            ExtractionLimits::default(),
        );

        assert_eq!(bundle.images.len(), 1);
        assert_eq!(bundle.text_blocks.len(), 0);
        assert_eq!(bundle.files.len(), 1);
        // Image bytes pass through untouched
        assert_eq!(bundle.images[0].data.as_ref(), png.as_slice());
        assert_eq!(bundle.images[0].content_type, "image/png");
    }

    #[test]
    fn generic_text_file_produces_tagged_block() {
        let bundle = assemble(
            vec![file("chat.txt", Some("text/plain"), b"wire the money today")],
            ExtractionLimits::default(),
        );

        assert_eq!(bundle.text_blocks.len(), 1);
        assert_eq!(bundle.text_blocks[0].tag, "TEXT (chat.txt)");
        assert_eq!(bundle.text_blocks[0].body, "wire the money today");
    }

    #[test]
    fn unreadable_binary_produces_placeholder() {
        let bundle = assemble(
            vec![file("dump.bin", None, b"\x00\x00\x00\x00")],
            ExtractionLimits::default(),
        );

        assert_eq!(bundle.text_blocks.len(), 1);
        assert_eq!(bundle.text_blocks[0].tag, "FILE (dump.bin)");
        assert!(bundle.text_blocks[0].body.contains("unreadable"));
    }

    #[test]
    fn textless_pdf_produces_scanned_placeholder() {
        let bundle = assemble(
            vec![file("scan.pdf", Some("application/pdf"), b"%PDF-1.4 garbage")],
            ExtractionLimits::default(),
        );

        assert_eq!(bundle.text_blocks.len(), 1);
        assert_eq!(bundle.text_blocks[0].tag, "PDF (scan.pdf)");
        assert!(bundle.text_blocks[0].body.contains("scanned"));
        // The PDF still ships as an attachment
        assert_eq!(bundle.files.len(), 1);
        assert_eq!(bundle.files[0].content_type, "application/pdf");
    }

    #[cfg(feature = "document")]
    #[test]
    fn text_pdf_produces_success_tag() {
        let data = crate::pdf::test_pdf::pdf_with_pages(&["invoice total 900 USD"]);
        let bundle = assemble(
            vec![file("statement.pdf", Some("application/pdf"), &data)],
            ExtractionLimits::default(),
        );

        assert_eq!(bundle.text_blocks.len(), 1);
        assert_eq!(bundle.text_blocks[0].tag, "PDF TEXT (statement.pdf)");
        assert!(bundle.text_blocks[0].body.contains("invoice total 900 USD"));
        assert_eq!(bundle.files.len(), 1);
    }

    #[test]
    fn attachments_are_independent_of_extraction_outcome() {
        let files = vec![
            file("a.png", Some("image/png"), b"imagebytes"),
            file("b.pdf", Some("application/pdf"), b"junk"),
            file("c.txt", None, b"readable"),
            file("d.bin", None, b"\xFF\xFE"),
        ];
        let bundle = assemble(files, ExtractionLimits::default());
        assert_eq!(bundle.files.len(), 4);
        assert_eq!(bundle.images.len(), 1);
        assert_eq!(bundle.text_blocks.len(), 3);
    }

    #[test]
    fn submission_order_is_preserved() {
        let bundle = assemble(
            vec![
                file("first.txt", None, b"one"),
                file("second.txt", None, b"two"),
            ],
            ExtractionLimits::default(),
        );
        assert_eq!(bundle.text_blocks[0].tag, "TEXT (first.txt)");
        assert_eq!(bundle.text_blocks[1].tag, "TEXT (second.txt)");
    }

    #[test]
    fn per_file_text_cap_applies() {
        let big = "x".repeat(100_000);
        let limits = ExtractionLimits {
            text_max_chars: 500,
            ..Default::default()
        };
        let bundle = assemble(vec![file("big.txt", None, big.as_bytes())], limits);
        assert_eq!(bundle.text_blocks[0].body.chars().count(), 500);
    }
}
