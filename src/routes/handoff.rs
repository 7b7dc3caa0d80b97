//! Hand-off relay endpoints
//!
//! Endpoints:
//! - POST /api/store-temp-analysis - Park an extension result for the dashboard
//! - GET /api/get-temp-analysis/:analysis_id - One-shot retrieval by the dashboard
//! - POST /api/store-document-context - Park analysis context for the voice assistant
//! - POST /api/webhook/get-document-analysis - Voice-assistant webhook lookup

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::{AppState, DocumentContext};

#[derive(Serialize)]
pub struct StoreTempResponse {
    pub success: bool,
    pub analysis_id: String,
}

#[derive(Serialize)]
pub struct TempAnalysisResponse {
    pub success: bool,
    pub data: serde_json::Value,
}

#[derive(Serialize)]
pub struct StoreContextResponse {
    pub success: bool,
    pub conversation_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookRequest {
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WebhookResponse {
    Found {
        success: bool,
        analysis: Option<serde_json::Value>,
        filename: Option<String>,
    },
    Missing {
        success: bool,
        error: String,
    },
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/store-temp-analysis", post(store_temp_analysis))
        .route("/api/get-temp-analysis/:analysis_id", get(get_temp_analysis))
        .route("/api/store-document-context", post(store_document_context))
        .route("/api/webhook/get-document-analysis", post(webhook_get_document_analysis))
}

/// POST /api/store-temp-analysis
async fn store_temp_analysis(
    State(state): State<AppState>,
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<StoreTempResponse>> {
    let Json(data) = payload?;
    let analysis_id = state.transfers().put(data);
    tracing::info!(analysis_id = %analysis_id, "Stored temporary analysis");

    Ok(Json(StoreTempResponse {
        success: true,
        analysis_id,
    }))
}

/// GET /api/get-temp-analysis/:analysis_id
///
/// Consumes the entry; a second request for the same id is a 404.
async fn get_temp_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<String>,
) -> Result<Json<TempAnalysisResponse>> {
    let data = state.transfers().take(&analysis_id).ok_or_else(|| {
        tracing::debug!(analysis_id = %analysis_id, "Temporary analysis missing, expired or consumed");
        AppError::NotFound("Analysis not found or expired".to_string())
    })?;

    tracing::info!(analysis_id = %analysis_id, "Handed off temporary analysis");
    Ok(Json(TempAnalysisResponse {
        success: true,
        data,
    }))
}

/// POST /api/store-document-context
async fn store_document_context(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DocumentContext>, JsonRejection>,
) -> Result<Json<StoreContextResponse>> {
    let Json(context) = payload?;
    let filename = context.filename.clone();
    let conversation_id = state.contexts().put(context);
    tracing::info!(conversation_id = %conversation_id, filename = ?filename, "Stored document context");

    Ok(Json(StoreContextResponse {
        success: true,
        conversation_id,
    }))
}

/// POST /api/webhook/get-document-analysis
async fn webhook_get_document_analysis(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<Json<WebhookResponse>> {
    let Json(request) = payload?;
    let context = request
        .conversation_id
        .as_deref()
        .and_then(|id| state.contexts().peek(id));

    let response = match context {
        Some(context) => WebhookResponse::Found {
            success: true,
            analysis: context.analysis,
            filename: context.filename,
        },
        None => {
            tracing::debug!(conversation_id = ?request.conversation_id, "Webhook context not found");
            WebhookResponse::Missing {
                success: false,
                error: "Document not found".to_string(),
            }
        }
    };

    Ok(Json(response))
}
