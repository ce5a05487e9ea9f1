//! Document text extraction for the formats the indexer accepts.

pub mod chunker;
mod pdf;
mod text;

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("Document contains no extractable text")]
    NoText,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text with metadata.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number. Always 1 for text and markdown.
    pub page_number: usize,
    pub text: String,
    /// Markdown headings found on this page.
    pub headings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub filename: String,
    /// Normalised extension: "pdf", "txt" or "md".
    pub file_type: String,
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// All page text, pages separated by a blank line.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }
}

/// Extract text from in-memory file contents, dispatching on the extension
/// of `filename`.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let (file_type, pages) = match ext.as_str() {
        "pdf" => ("pdf", pdf::extract_pdf(bytes)?),
        "txt" | "text" => ("txt", text::extract_plain(bytes)),
        "md" | "markdown" => ("md", text::extract_markdown(bytes)),
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        pages,
    })
}

/// Read `path` from disk and extract its text.
pub fn extract_file(path: impl AsRef<Path>) -> Result<ExtractedDocument, ExtractionError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let doc = extract_text(&bytes, filename)?;
    info!(
        file = %path.display(),
        file_type = %doc.file_type,
        pages = doc.pages.len(),
        chars = doc.total_chars(),
        "extracted document"
    );
    Ok(doc)
}
