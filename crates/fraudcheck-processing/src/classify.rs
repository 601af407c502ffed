//! File classification
//!
//! The single source of truth for routing an uploaded file: both the prompt
//! path (which extraction strategy runs) and the attachment path (which MIME
//! type goes on the outbound email) derive from this module, computed once per
//! file and cached on the `UploadedFile`. Callers must not re-derive media
//! types locally.

/// Effective media kind of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Inlined into the multimodal prompt as-is; no text extraction.
    Image,
    /// Routed to the PDF text extractor.
    Pdf,
    /// Routed to the plain text extractor.
    Generic,
}

/// Normalize a MIME type by stripping parameters
/// (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

fn extension_of(filename: &str) -> Option<String> {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    let name = name.rsplit('\\').next().unwrap_or(name);
    let mut parts = name.rsplitn(2, '.');
    let ext = parts.next()?;
    // No '.' at all, or a leading-dot name like ".env"
    parts.next().filter(|stem| !stem.is_empty())?;
    Some(ext.to_lowercase())
}

/// Classify a file by its declared content type, falling back to the filename
/// extension when the client sent none. Unknown or ambiguous input always
/// resolves to `Generic`; this function never fails.
pub fn classify(filename: &str, declared_content_type: Option<&str>) -> MediaKind {
    if let Some(declared) = declared_content_type.filter(|s| !s.trim().is_empty()) {
        return match normalize_mime_type(declared).to_lowercase().as_str() {
            "image/png" | "image/jpeg" | "image/webp" => MediaKind::Image,
            "application/pdf" => MediaKind::Pdf,
            _ => MediaKind::Generic,
        };
    }

    match extension_of(filename).as_deref() {
        Some("png") | Some("jpg") | Some("jpeg") | Some("webp") => MediaKind::Image,
        Some("pdf") => MediaKind::Pdf,
        _ => MediaKind::Generic,
    }
}

/// Resolve the MIME type used for the inline image payload and the outbound
/// attachment: the declared type when present (normalized), otherwise derived
/// from the extension, otherwise `application/octet-stream`.
pub fn resolve_content_type(filename: &str, declared_content_type: Option<&str>) -> String {
    if let Some(declared) = declared_content_type.filter(|s| !s.trim().is_empty()) {
        return normalize_mime_type(declared).to_lowercase();
    }

    match extension_of(filename).as_deref() {
        Some("png") => "image/png".to_string(),
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("webp") => "image/webp".to_string(),
        Some("pdf") => "application/pdf".to_string(),
        Some("txt") | Some("md") | Some("csv") | Some("log") => "text/plain".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_content_type_wins() {
        assert_eq!(classify("photo.bin", Some("image/png")), MediaKind::Image);
        assert_eq!(classify("scan.dat", Some("application/pdf")), MediaKind::Pdf);
        assert_eq!(classify("notes.png", Some("text/plain")), MediaKind::Generic);
    }

    #[test]
    fn mime_parameters_are_stripped() {
        assert_eq!(
            classify("photo", Some("image/jpeg; charset=binary")),
            MediaKind::Image
        );
    }

    #[test]
    fn extension_fallback_when_no_declared_type() {
        assert_eq!(classify("photo.PNG", None), MediaKind::Image);
        assert_eq!(classify("statement.pdf", None), MediaKind::Pdf);
        assert_eq!(classify("notes.txt", None), MediaKind::Generic);
        assert_eq!(classify("notes.txt", Some("")), MediaKind::Generic);
    }

    #[test]
    fn unknown_input_resolves_to_generic() {
        assert_eq!(classify("", None), MediaKind::Generic);
        assert_eq!(classify("noextension", None), MediaKind::Generic);
        assert_eq!(classify(".env", None), MediaKind::Generic);
    }

    #[test]
    fn classification_is_deterministic() {
        let first = classify("receipt.jpg", Some("image/jpeg"));
        let second = classify("receipt.jpg", Some("image/jpeg"));
        assert_eq!(first, second);
    }

    #[test]
    fn resolved_mime_derives_from_extension() {
        assert_eq!(resolve_content_type("a.png", None), "image/png");
        assert_eq!(resolve_content_type("a.pdf", None), "application/pdf");
        assert_eq!(
            resolve_content_type("a.xyz", None),
            "application/octet-stream"
        );
        assert_eq!(
            resolve_content_type("a.xyz", Some("Image/JPEG; q=1")),
            "image/jpeg"
        );
    }
}
