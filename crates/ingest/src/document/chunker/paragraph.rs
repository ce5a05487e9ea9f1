use nest_core::NestError;

use super::types::TextSplitter;

/// Groups consecutive non-empty lines into chunks of `merge_count`, joined
/// with a single space. The last chunk holds whatever remains.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSplitter {
    merge_count: usize,
}

impl ParagraphSplitter {
    pub const DEFAULT_MERGE_COUNT: usize = 8;

    pub fn new(merge_count: usize) -> Result<Self, NestError> {
        if merge_count == 0 {
            return Err(NestError::InvalidMergeCount);
        }
        Ok(Self { merge_count })
    }

    pub fn merge_count(&self) -> usize {
        self.merge_count
    }
}

impl Default for ParagraphSplitter {
    fn default() -> Self {
        Self {
            merge_count: Self::DEFAULT_MERGE_COUNT,
        }
    }
}

impl TextSplitter for ParagraphSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let paragraphs: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        paragraphs
            .chunks(self.merge_count)
            .map(|group| group.join(" "))
            .collect()
    }
}
