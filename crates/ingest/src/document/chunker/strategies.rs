//! Strategy dispatch from configuration.

use nest_core::config::SplitterConfig;
use nest_core::{NestError, SplitterStrategy};
use tracing::debug;

use super::paragraph::ParagraphSplitter;
use super::recursive::RecursiveSplitter;
use super::types::TextSplitter;
use crate::document::ExtractedDocument;

/// Build the splitter selected by `config`, validating it first.
pub fn build_splitter(config: &SplitterConfig) -> Result<Box<dyn TextSplitter>, NestError> {
    config.validate()?;
    Ok(match config.strategy {
        SplitterStrategy::Recursive => Box::new(RecursiveSplitter::from_config(config)?),
        SplitterStrategy::Paragraph => Box::new(ParagraphSplitter::new(config.merge_count)?),
    })
}

/// One-shot split of `text` with the splitter selected by `config`.
pub fn split_text(text: &str, config: &SplitterConfig) -> Result<Vec<String>, NestError> {
    let splitter = build_splitter(config)?;
    Ok(splitter.split(text))
}

/// Split every page of an extracted document, in page order.
pub fn split_document(doc: &ExtractedDocument, splitter: &dyn TextSplitter) -> Vec<String> {
    let chunks: Vec<String> = doc
        .pages
        .iter()
        .flat_map(|page| splitter.split(&page.text))
        .collect();
    debug!(
        filename = %doc.filename,
        pages = doc.pages.len(),
        chunks = chunks.len(),
        "split document"
    );
    chunks
}
