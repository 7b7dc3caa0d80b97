//! Multipart upload handling shared by the PDF endpoints

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::{AppError, Result};

/// Multipart field names accepted for the uploaded file
const FILE_FIELDS: &[&str] = &["file", "document"];

/// A file read from a multipart request
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    /// Filename with a fallback for clients that omit it
    pub fn filename_or(&self, default: &str) -> String {
        self.filename.clone().unwrap_or_else(|| default.to_string())
    }

    /// Reject files over `max_bytes`
    pub fn ensure_within(&self, max_bytes: usize) -> Result<()> {
        if self.data.len() > max_bytes {
            return Err(too_large(max_bytes));
        }
        Ok(())
    }

    /// Case-sensitive: `notes.PDF` is rejected
    pub fn has_pdf_extension(&self) -> bool {
        self.filename
            .as_deref()
            .map(|name| name.ends_with(".pdf"))
            .unwrap_or(false)
    }
}

pub fn too_large(max_bytes: usize) -> AppError {
    AppError::BadRequest(format!("File too large (max {}MB)", max_bytes / (1024 * 1024)))
}

/// Read the first file field
///
/// `max_bytes` only shapes the error when the body limit layer trips.
pub async fn read_upload(mut multipart: Multipart, max_bytes: usize) -> Result<UploadedFile> {
    let multipart_error = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return too_large(max_bytes);
        }
        tracing::error!("Failed to read multipart upload: {}", e);
        AppError::BadRequest(format!("Failed to read upload: {}", e))
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        if !FILE_FIELDS.contains(&name.as_str()) {
            tracing::debug!("Skipping multipart field '{}'", name);
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string());
        let data = field.bytes().await.map_err(multipart_error)?;

        tracing::debug!(filename = ?filename, bytes = data.len(), "Received upload");
        return Ok(UploadedFile { filename, data });
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::BadRequest(
        "No file provided. Use field name 'file'".to_string(),
    ))
}
