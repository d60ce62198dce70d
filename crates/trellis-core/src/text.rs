#[must_use]
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clips to at most `max_chars` characters on a char boundary, no ellipsis.
#[must_use]
pub(crate) fn clip_chars(text: &str, max_chars: usize) -> String {
    let Some((clip_idx, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    text[..clip_idx].to_string()
}
