//! MuPDF-backed PDF text extraction
//!
//! MuPDF documents are not `Send`, so each extraction opens the document
//! inside a blocking task and drops it before returning.

use async_trait::async_trait;
use axum::body::Bytes;
use mupdf::Document;
use tokio::time::{timeout, Duration};

use super::{ExtractError, TextExtractor};

/// Default timeout for a whole-document extraction
const EXTRACT_TIMEOUT_SECS: u64 = 30;

/// Extracts text from every page of a PDF with MuPDF
#[derive(Debug, Clone)]
pub struct MupdfExtractor {
    timeout_secs: u64,
}

impl MupdfExtractor {
    pub fn new() -> Self {
        Self {
            timeout_secs: EXTRACT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Default for MupdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for MupdfExtractor {
    async fn extract(&self, data: Bytes) -> Result<String, ExtractError> {
        let task = tokio::task::spawn_blocking(move || extract_pdf_text(&data));

        let text = timeout(Duration::from_secs(self.timeout_secs), task)
            .await
            .map_err(|_| ExtractError::Timeout(self.timeout_secs))?
            .map_err(|e| ExtractError::Join(e.to_string()))??;

        if text.trim().is_empty() {
            return Err(ExtractError::Empty);
        }

        Ok(text)
    }
}

/// Concatenate the text of every page, in page order
fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::from_bytes(data, "application/pdf")
        .map_err(|e| ExtractError::Open(e.to_string()))?;
    let page_count = doc
        .page_count()
        .map_err(|e| ExtractError::Open(e.to_string()))?;

    let mut text = String::new();
    for index in 0..page_count {
        let page_error = |e: mupdf::Error| ExtractError::Page {
            page: index as usize + 1,
            message: e.to_string(),
        };
        let page = doc.load_page(index).map_err(page_error)?;
        text.push_str(&page.to_text().map_err(page_error)?);
        // keep the last word of a page apart from the first of the next
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }

    tracing::debug!(pages = page_count, chars = text.chars().count(), "Extracted PDF text");
    Ok(text)
}
