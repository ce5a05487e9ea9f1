use thiserror::Error;

#[derive(Error, Debug)]
pub enum NestError {
    /// Raised when a splitter is built with `chunk_size <= chunk_overlap`.
    #[error("invalid chunk size: chunk_size ({chunk_size}) must be greater than chunk_overlap ({chunk_overlap})")]
    InvalidChunkSize {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    #[error("invalid merge count: paragraph splitter needs at least one paragraph per chunk")]
    InvalidMergeCount,

    /// Two vectors (or a query and the corpus) disagree on dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An append batch whose chunk and vector counts differ.
    #[error("batch length mismatch: {chunks} chunks but {vectors} vectors")]
    BatchLengthMismatch { chunks: usize, vectors: usize },

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
