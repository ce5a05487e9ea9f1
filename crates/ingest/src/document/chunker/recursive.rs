//! Hierarchical splitting: coarse separators first, finer ones only where a
//! piece is still too large.

use nest_core::config::{SplitterConfig, DEFAULT_SEPARATORS};
use nest_core::NestError;

use super::helpers::{merge_pieces, split_on_separator};
use super::length::LengthFunction;
use super::types::TextSplitter;

/// Recursive character splitter.
///
/// Tries each separator in priority order and uses the first one present in
/// the text. Pieces within budget are merged with overlap; oversized pieces
/// are split again with the full separator list. The separator list always
/// ends with `""` (per character), and single characters are never split
/// further, so recursion terminates for any `chunk_size >= 1`.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
    length: LengthFunction,
}

impl RecursiveSplitter {
    /// Splitter with the default separators, costed in characters.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, NestError> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(NestError::InvalidChunkSize {
                chunk_size,
                chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            length: LengthFunction::default(),
        })
    }

    pub fn from_config(config: &SplitterConfig) -> Result<Self, NestError> {
        config.validate()?;
        Ok(Self::new(config.chunk_size, config.chunk_overlap)?
            .with_separators(config.separators.clone())
            .with_length_function(LengthFunction::from_unit(config.length_unit)?))
    }

    /// Replace the separator list. A trailing `""` is appended when missing.
    pub fn with_separators(mut self, mut separators: Vec<String>) -> Self {
        if separators.last().map_or(true, |s| !s.is_empty()) {
            separators.push(String::new());
        }
        self.separators = separators;
        self
    }

    pub fn with_length_function(mut self, length: LengthFunction) -> Self {
        self.length = length;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    fn pick_separator(&self, text: &str) -> &str {
        self.separators
            .iter()
            .find(|sep| sep.is_empty() || text.contains(sep.as_str()))
            .map_or("", String::as_str)
    }

    fn split_recursive(&self, text: &str, depth: usize) -> Vec<String> {
        let separator = self.pick_separator(text);
        // Each level moves to a strictly finer separator, so `depth` never
        // exceeds the list length in practice; the bound holds regardless.
        let atomic = separator.is_empty() || depth >= self.separators.len();

        let mut chunks = Vec::new();
        let mut good: Vec<String> = Vec::new();

        for piece in split_on_separator(text, separator) {
            if atomic || self.length.measure(&piece) < self.chunk_size {
                good.push(piece);
                continue;
            }
            if !good.is_empty() {
                chunks.extend(self.merge(&good, separator));
                good.clear();
            }
            chunks.extend(self.split_recursive(&piece, depth + 1));
        }

        if !good.is_empty() {
            chunks.extend(self.merge(&good, separator));
        }
        chunks
    }

    fn merge(&self, pieces: &[String], separator: &str) -> Vec<String> {
        merge_pieces(
            pieces,
            separator,
            self.chunk_size,
            self.chunk_overlap,
            &self.length,
        )
    }
}

impl TextSplitter for RecursiveSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, 0)
    }
}
