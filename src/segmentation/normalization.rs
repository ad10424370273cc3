// Sentence whitespace normalization: hard line breaks become single spaces

/// Normalize a raw sentence slice for display
///
/// Interior line breaks (`\n`, `\r\n`, lone `\r`) and runs of other whitespace
/// collapse to a single space; leading and trailing whitespace is removed.
/// The result never contains a newline.
pub fn normalize_sentence(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_sentence_into(text, &mut result);
    result
}

/// Normalize into a caller-supplied buffer, clearing it first
pub fn normalize_sentence_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            buffer.push(' ');
            pending_space = false;
        }
        buffer.push(ch);
    }
}
