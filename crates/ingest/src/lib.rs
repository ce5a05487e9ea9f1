pub mod document;
pub mod embedding;
pub mod pipeline;

pub use document::chunker::{build_splitter, split_text, TextSplitter};
pub use document::{extract_file, extract_text, ExtractedDocument, ExtractionError};
pub use pipeline::{IndexReport, Indexer, IngestError};
