//! Sliding-window text chunking
//!
//! Chunk boundaries are a pure function of the input text and parameters,
//! so re-chunking an unchanged document always reproduces the same
//! sequence. That determinism is what makes chunk-addressed re-indexing
//! overwrite records instead of duplicating them.

use crate::error::{Error, Result};

/// Split text into overlapping chunks.
///
/// Window `i` starts at character `i * (size - overlap)` and spans `size`
/// characters; the last chunk may be shorter. Sizes are measured in
/// characters, not bytes, so multi-byte text never splits inside a code
/// point.
///
/// Whitespace-only input yields an empty sequence. `overlap >= size` is
/// rejected: the window would stop advancing.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>> {
    if size == 0 {
        return Err(Error::invalid_configuration("chunk size must be positive"));
    }
    if overlap >= size {
        return Err(Error::invalid_configuration(format!(
            "chunk overlap ({}) must be smaller than chunk size ({})",
            overlap, size
        )));
    }
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = text.chars().collect();
    let stride = size - overlap;
    let mut chunks = Vec::with_capacity(chars.len() / stride + 1);
    let mut start = 0;

    while start < chars.len() {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += stride;
    }

    Ok(chunks)
}

/// Chunker configured with a fixed size and overlap
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Chunker {
    /// Create a chunker, validating the parameters up front
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        // Run the parameter checks once at construction
        chunk_text("", chunk_size, overlap)?;
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Chunk a document body with the configured parameters
    pub fn chunk(&self, text: &str) -> Result<Vec<String>> {
        chunk_text(text, self.chunk_size, self.overlap)
    }

    /// Configured chunk size in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sliding_window_boundaries() {
        let text = "A".repeat(2500);
        let chunks = chunk_text(&text, 1000, 200).unwrap();

        // Windows 0..1000, 800..1800, 1600..2500 (net stride 800)
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 900);
    }

    #[test]
    fn test_deterministic() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(100);
        let first = chunk_text(&text, 300, 60).unwrap();
        let second = chunk_text(&text, 300, 60).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tails_reconstruct_original() {
        let text: String = (0..2750).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let size = 1000;
        let overlap = 200;
        let chunks = chunk_text(&text, size, overlap).unwrap();

        // First chunk whole, every later chunk minus its overlapping head
        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(overlap));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk_text("hello world", 1000, 200).unwrap();
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(chunk_text("", 1000, 200).unwrap().is_empty());
        assert!(chunk_text("   \n\t  ", 1000, 200).unwrap().is_empty());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        assert!(matches!(
            chunk_text("some text", 100, 100),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            chunk_text("some text", 100, 150),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            chunk_text("some text", 0, 0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "日本語のテキスト".repeat(50);
        let chunks = chunk_text(&text, 100, 20).unwrap();

        let total: usize = text.chars().count();
        assert_eq!(chunks[0].chars().count(), 100);
        assert!(chunks.iter().all(|c| !c.is_empty()));

        let mut rebuilt: String = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(20));
        }
        assert_eq!(rebuilt.chars().count(), total);
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_no_trailing_overlap_only_chunk() {
        // 1000 chars exactly: one chunk, not a second window of pure overlap
        let text = "x".repeat(1000);
        let chunks = chunk_text(&text, 1000, 200).unwrap();
        assert_eq!(chunks.len(), 1);
    }
}
