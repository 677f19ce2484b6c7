//! Word-bounded chunking of document text

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into chunks of at most `chunk_size` characters.
///
/// Words are never split: a word longer than the budget becomes a chunk on
/// its own. Joining the chunks with single spaces yields
/// [`normalize_whitespace`] of the input. A zero budget behaves like 1.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    let budget = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > budget {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
