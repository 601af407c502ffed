//! Plain text extraction
//!
//! Best-effort lossy decode of generic file content. Absence of extractable
//! text is a normal, silent outcome, never an error.

/// Truncate a string to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Decode raw bytes as UTF-8 (invalid sequences replaced), trim, and truncate
/// to `max_chars`. Returns an empty string when nothing readable remains:
/// content consisting only of whitespace, control bytes, and replacement
/// characters counts as unreadable.
pub fn extract_text(data: &[u8], max_chars: usize) -> String {
    let decoded = String::from_utf8_lossy(data);
    let trimmed = decoded.trim();
    let readable = trimmed
        .chars()
        .any(|c| !c.is_control() && !c.is_whitespace() && c != '\u{FFFD}');
    if !readable {
        return String::new();
    }
    truncate_chars(trimmed, max_chars)
}
