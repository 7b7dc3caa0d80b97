//! Extraction error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Bytes could not be opened as a PDF
    #[error("Failed to open PDF: {0}")]
    Open(String),

    /// A page failed to load or yield text
    #[error("Failed to extract text from page {page}: {message}")]
    Page { page: usize, message: String },

    #[error("Text extraction timed out after {0} seconds")]
    Timeout(u64),

    #[error("Extraction task failed: {0}")]
    Join(String),

    /// Document opened but contains no extractable text
    #[error("Could not extract text from PDF")]
    Empty,
}

impl ExtractError {
    /// Whether the failure is the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
