use tracing::{debug, warn};

use super::{ExtractionError, PageContent};

/// Extract PDF text page by page. `pdf-extract` separates pages with form
/// feeds; blank pages are skipped but keep their original numbering.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    if text.trim().is_empty() {
        warn!("PDF contains no extractable text (scanned or image-only?)");
        return Err(ExtractionError::NoText);
    }

    let pages: Vec<PageContent> = text
        .split('\x0C')
        .enumerate()
        .filter(|(_, page)| !page.trim().is_empty())
        .map(|(i, page)| PageContent {
            page_number: i + 1,
            text: page.trim().to_string(),
            headings: Vec::new(),
        })
        .collect();

    debug!(pages = pages.len(), "extracted PDF text");
    Ok(pages)
}
