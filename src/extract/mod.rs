//! Text extraction
//!
//! Turns uploaded document bytes into plain text. The HTTP layer only sees the
//! [`TextExtractor`] trait; the production implementation is backed by MuPDF.

mod pdf;
mod types;

use async_trait::async_trait;
use axum::body::Bytes;

pub use pdf::MupdfExtractor;
pub use types::ExtractError;

/// Plain-text extractor for uploaded documents
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of a document, pages in order
    async fn extract(&self, data: Bytes) -> Result<String, ExtractError>;
}
