//! Document registry endpoints
//!
//! - POST /api/upload-document - Analyse a PDF and register the result
//! - GET /api/document/:doc_id - Fetch a registered record
//! - POST /api/agent/get-document-analysis - Voice-agent lookup, defaults to the latest upload

use axum::{
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::upload::read_upload;
use crate::error::{AppError, Result};
use crate::state::{AppState, DocumentRecord};
use crate::store::new_key;

/// Characters of extracted text kept in the registry record
const STORED_TEXT_CHARS: usize = 5000;
/// Characters of extracted text echoed back as a preview
const PREVIEW_CHARS: usize = 500;

/// Header names accepted for the agent's document id
const DOC_ID_HEADERS: &[&str] = &["doc_id", "x-doc-id"];

const LATEST: &str = "latest";

#[derive(Serialize)]
pub struct UploadDocumentResponse {
    pub doc_id: String,
    pub filename: String,
    pub analysis: String,
    pub document_preview: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AgentQuery {
    pub doc_id: Option<String>,
}

/// Voice-agent response; failures are reported in-band with HTTP 200
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AgentResponse {
    Found {
        success: bool,
        filename: String,
        analysis: String,
        uploaded_at: String,
    },
    Missing {
        success: bool,
        message: String,
    },
}

impl AgentResponse {
    fn found(record: &DocumentRecord) -> Self {
        Self::Found {
            success: true,
            filename: record.filename.clone(),
            analysis: record.full_analysis.clone(),
            uploaded_at: record.uploaded_at.clone(),
        }
    }

    fn missing(message: impl Into<String>) -> Self {
        Self::Missing {
            success: false,
            message: message.into(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload-document", post(upload_document))
        .route("/api/document/:doc_id", get(get_document))
        .route("/api/agent/get-document-analysis", post(agent_get_document))
}

fn excerpt(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

/// POST /api/upload-document
async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadDocumentResponse>> {
    let max_bytes = state.config().upload.max_bytes;
    let upload = read_upload(multipart, max_bytes).await?;
    upload.ensure_within(max_bytes)?;

    let doc_id = new_key();
    let filename = upload.filename_or("document.pdf");
    tracing::info!(doc_id = %doc_id, filename = %filename, bytes = upload.data.len(), "Receiving document");

    let text = state.extractor().extract(upload.data).await?;
    tracing::info!(doc_id = %doc_id, chars = text.chars().count(), "Extracted document text");

    let analysis = state.analysis().analyze(&text, &filename).await;

    let record = DocumentRecord {
        doc_id: doc_id.clone(),
        filename: filename.clone(),
        document_text: excerpt(&text, STORED_TEXT_CHARS),
        full_analysis: analysis.clone(),
        uploaded_at: chrono::Utc::now().to_rfc3339(),
    };
    state.documents().register(doc_id.clone(), record);

    tracing::info!(doc_id = %doc_id, "Document processed");

    Ok(Json(UploadDocumentResponse {
        doc_id,
        filename,
        analysis,
        document_preview: format!("{}...", excerpt(&text, PREVIEW_CHARS)),
    }))
}

/// GET /api/document/:doc_id
async fn get_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<DocumentRecord>> {
    let record = state
        .documents()
        .get(&doc_id)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(Json(record.as_ref().clone()))
}

/// The requested document id: query string first, then headers
fn requested_doc_id(query: AgentQuery, headers: &HeaderMap) -> Option<String> {
    query
        .doc_id
        .or_else(|| {
            DOC_ID_HEADERS
                .iter()
                .find_map(|name| headers.get(*name)?.to_str().ok().map(str::to_string))
        })
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// POST /api/agent/get-document-analysis
async fn agent_get_document(
    State(state): State<AppState>,
    Query(query): Query<AgentQuery>,
    headers: HeaderMap,
) -> Json<AgentResponse> {
    let doc_id = requested_doc_id(query, &headers);
    tracing::info!(doc_id = ?doc_id, "Agent requesting document analysis");

    let response = match doc_id.as_deref() {
        None | Some(LATEST) => match state.documents().get_latest() {
            Some(record) => AgentResponse::found(&record),
            None => AgentResponse::missing(
                "No document has been uploaded yet. Please ask the user to upload a document first.",
            ),
        },
        Some(id) => match state.documents().get(id) {
            Some(record) => AgentResponse::found(&record),
            None => AgentResponse::missing(format!("Document {} not found.", id)),
        },
    };

    Json(response)
}
