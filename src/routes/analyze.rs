//! Stateless analysis endpoints
//!
//! - POST /api/analyze - Analyse an uploaded PDF
//! - POST /api/analyze-text - Analyse text captured by the browser extension

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::upload::read_upload;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: String,
    pub filename: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeTextRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeTextResponse {
    pub success: bool,
    pub analysis: String,
    pub url: String,
    pub title: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(analyze_pdf))
        .route("/api/analyze-text", post(analyze_text))
}

/// POST /api/analyze
async fn analyze_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>> {
    let max_bytes = state.config().upload.max_bytes;
    let upload = read_upload(multipart, max_bytes).await?;

    if !upload.has_pdf_extension() {
        return Err(AppError::BadRequest("Only PDF files are allowed".to_string()));
    }
    upload.ensure_within(max_bytes)?;

    let filename = upload.filename_or("document.pdf");
    let text = state.extractor().extract(upload.data).await?;
    tracing::info!(filename = %filename, chars = text.chars().count(), "Extracted text from PDF");

    let analysis = state.analysis().analyze(&text, &filename).await;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
        filename,
    }))
}

/// POST /api/analyze-text
async fn analyze_text(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<AnalyzeTextResponse>> {
    let Json(request) = payload?;
    let text = request.text.unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::BadRequest("No text provided".to_string()));
    }

    let url = request.url.unwrap_or_default();
    let title = request.title.unwrap_or_default();
    tracing::info!(url = %url, chars = text.chars().count(), "Analyzing extension text");

    let analysis = state.analysis().analyze(&text, &title).await;

    Ok(Json(AnalyzeTextResponse {
        success: true,
        analysis,
        url,
        title,
    }))
}
