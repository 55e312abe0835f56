//! Segment chunking for text properties that exceed the per-field limit.

/// Split `text` into ordered segments of at most `max_chars` characters.
///
/// Concatenating the returned segments reproduces `text` exactly. Splits are
/// made on character boundaries, so multi-byte content is never cut mid-char.
/// Empty input yields no segments.
pub fn segment_text(text: &str, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0, "segment size must be positive");
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;
    for ch in text.chars() {
        if count == max_chars {
            segments.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
