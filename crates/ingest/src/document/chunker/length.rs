//! Length functions: how a fragment of text is costed against a chunk budget.

use std::fmt;
use std::sync::Arc;

use nest_core::{LengthUnit, NestError};
use tiktoken_rs::CoreBPE;

/// Shared handle to the cl100k_base BPE, the encoding used by the
/// ada-002 embedding model and GPT-3.5/4 chat models.
#[derive(Clone)]
pub struct TokenEncoder {
    bpe: Arc<CoreBPE>,
}

impl TokenEncoder {
    pub fn cl100k() -> Result<Self, NestError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| NestError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe: Arc::new(bpe) })
    }

    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

impl fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenEncoder(cl100k_base)")
    }
}

/// Cost model used identically by splitting and merging.
#[derive(Debug, Clone, Default)]
pub enum LengthFunction {
    /// Unicode scalar values.
    #[default]
    CharacterCount,
    /// Whitespace-separated words.
    WordCount,
    TokenCount(TokenEncoder),
}

impl LengthFunction {
    pub fn from_unit(unit: LengthUnit) -> Result<Self, NestError> {
        Ok(match unit {
            LengthUnit::Characters => Self::CharacterCount,
            LengthUnit::Words => Self::WordCount,
            LengthUnit::Tokens => Self::TokenCount(TokenEncoder::cl100k()?),
        })
    }

    pub fn unit(&self) -> LengthUnit {
        match self {
            Self::CharacterCount => LengthUnit::Characters,
            Self::WordCount => LengthUnit::Words,
            Self::TokenCount(_) => LengthUnit::Tokens,
        }
    }

    pub fn measure(&self, text: &str) -> usize {
        match self {
            Self::CharacterCount => text.chars().count(),
            Self::WordCount => text.split_whitespace().count(),
            Self::TokenCount(encoder) => encoder.count(text),
        }
    }
}
