#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capped {
    pub value: String,
    pub was_truncated: bool,
}

/// Keeps at most `max_chars` characters of `text`. Lengths are counted in
/// `char`s so a cut never lands inside a code point.
pub fn cap(text: &str, max_chars: usize) -> Capped {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => Capped {
            value: text[..end].to_string(),
            was_truncated: true,
        },
        None => Capped {
            value: text.to_string(),
            was_truncated: false,
        },
    }
}
