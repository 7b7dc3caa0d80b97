//! Analysis types

use serde::{Deserialize, Serialize};

/// Which hosted model API a provider talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Generative Language API, authenticated with an API key
    Gemini,
    /// Vertex AI, authenticated with a bearer token
    Vertex,
}

/// Analysis error types
///
/// These never leave the analysis module: the service converts every one of
/// them into the fallback report.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis provider not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Provider returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Request(err.to_string())
    }
}
