/// Sentence shown when the URL carries no deep link.
pub const DEFAULT_TEXT: &str = "Joel is";

/// Strip trailing whitespace before the text is sent as a model prefix.
pub fn trim_right(text: &str) -> &str {
    text.trim_end()
}

/// Whether the text would produce a non-empty model prefix.
pub fn has_prefix(text: &str) -> bool {
    !trim_right(text).is_empty()
}

/// Text up to (not including) the last space-delimited token.
///
/// A space at index 0 does not count as a token boundary, so `" a"` and `"a"`
/// both truncate to the empty string.
pub fn undo_prefix(text: &str) -> &str {
    match text.rfind(' ') {
        Some(idx) if idx > 0 => &text[..idx],
        _ => "",
    }
}
