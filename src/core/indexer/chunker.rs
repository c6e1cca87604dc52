//! UTF-8 safe content slicing.
//!
//! Oversized records are split into consecutive, non-overlapping
//! slices of a fixed number of characters. Slicing uses
//! `char_indices()` so every boundary falls on a valid character
//! boundary and multi-byte text never panics.
//!
//! # Example
//!
//! ```
//! use docindex::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(4);
//! let slices = chunker.split("Hello 👋 World");
//!
//! assert_eq!(slices.concat(), "Hello 👋 World");
//! ```

/// Fixed-width character slicer.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Number of characters per slice
    chunk_size: usize,
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is 0.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be > 0");

        Self { chunk_size }
    }

    /// Get the slice length in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of slices `split` would produce: `ceil(chars / chunk_size)`.
    pub fn chunk_count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chunk_size)
    }

    /// Split text into consecutive slices of `chunk_size` characters.
    ///
    /// The slices never overlap and concatenate back to `text`.
    /// The last slice holds the remainder. Empty input yields no
    /// slices.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // (byte offset, char) pairs keep all slicing on char
        // boundaries
        let char_indices: Vec<(usize, char)> = text.char_indices().collect();

        let mut slices = Vec::with_capacity(char_indices.len().div_ceil(self.chunk_size));
        let mut char_start_idx = 0;

        while char_start_idx < char_indices.len() {
            let char_end_idx = (char_start_idx + self.chunk_size).min(char_indices.len());

            let byte_start = char_indices[char_start_idx].0;
            let byte_end = if char_end_idx < char_indices.len() {
                char_indices[char_end_idx].0
            } else {
                text.len()
            };

            slices.push(&text[byte_start..byte_end]);
            char_start_idx = char_end_idx;
        }

        slices
    }
}
