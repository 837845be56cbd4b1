/// Number of characters shown in browse/search previews
pub const PREVIEW_CHARS: usize = 500;

/// First `max_chars` characters of `text`, with `"..."` appended when cut.
///
/// Counts chars rather than bytes so multi-byte text never splits mid-codepoint.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
