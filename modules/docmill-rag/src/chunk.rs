/// Windowing policy for splitting extracted text before embedding.
#[derive(Debug, Clone, Copy)]
pub struct Chunking {
    /// Window length in characters.
    pub size: usize,
    /// Characters shared between consecutive windows.
    pub overlap: usize,
}

impl Default for Chunking {
    fn default() -> Self {
        Self {
            size: 1000,
            overlap: 200,
        }
    }
}

/// Split text into fixed-size character windows that overlap by `overlap`.
///
/// Windows start every `size - overlap` characters, so the tail of one chunk
/// reappears at the head of the next and no sentence is cut off without
/// context on either side. The final window may be shorter. Splitting on
/// character boundaries keeps multi-byte text intact. An `overlap` at or
/// above `size` is clamped to a step of one character rather than looping
/// forever.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let step = size.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_overlap_by_the_configured_amount() {
        let chunks = chunk_text("abcdefghij", 4, 2);
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "ghij", "ij"]);
    }

    #[test]
    fn zero_overlap_tiles_the_text() {
        let chunks = chunk_text("abcdefghij", 4, 0);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(chunk_text("hi", 1000, 200), vec!["hi"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 1000, 200).is_empty());
    }

    #[test]
    fn overlap_at_or_above_size_still_terminates() {
        let chunks = chunk_text("abc", 2, 5);
        assert_eq!(chunks, vec!["ab", "bc", "c"]);
    }

    #[test]
    fn multibyte_text_splits_on_character_boundaries() {
        let chunks = chunk_text("café déjà vu", 5, 1);
        let rejoined: String = chunks.concat();
        assert!(rejoined.contains("café"));
        assert!(chunks.iter().all(|c| c.chars().count() <= 5));
    }
}
