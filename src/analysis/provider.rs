//! Analysis Providers
//!
//! Defines the provider trait and the hosted Gemini implementation.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::Duration;

use super::credentials::Credentials;
use super::types::{AnalysisError, ProviderKind};
use crate::config::AnalysisConfig;

/// Characters of document text sent to the model
pub const MAX_PROMPT_CHARS: usize = 15_000;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Analysis provider trait
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Get the provider type
    fn kind(&self) -> ProviderKind;

    /// Produce a legal-risk report for `text`; `label` names the document
    async fn analyze(&self, text: &str, label: &str) -> Result<String, AnalysisError>;
}

/// Build the legal-analysis prompt for a document
pub fn build_prompt(text: &str) -> String {
    let excerpt: String = text.chars().take(MAX_PROMPT_CHARS).collect();

    format!(
        "You are a legal document analyzer. Analyze this document and provide:

1. EXECUTIVE SUMMARY (2-3 sentences)
2. KEY TERMS (bullet points)
3. RISK ASSESSMENT for each critical clause:
   - Label as HIGH RISK, MEDIUM RISK, or LOW RISK
   - Explain why
4. CONSUMER WARNINGS (things users should be aware of)
5. HIDDEN CLAUSES (easy to miss but important)

Document:
{excerpt}

Format your response clearly with markdown headers.
"
    )
}

/// How requests are authenticated
#[derive(Debug, Clone)]
enum GeminiAuth {
    ApiKey(String),
    Bearer(String),
}

/// Gemini `generateContent` provider
pub struct GeminiProvider {
    client: reqwest::Client,
    endpoint: String,
    auth: GeminiAuth,
}

impl GeminiProvider {
    /// Build a provider from loaded credentials
    ///
    /// Returns `None` when the credentials carry neither an API key nor an
    /// access token.
    pub fn from_credentials(credentials: &Credentials, config: &AnalysisConfig) -> Option<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .ok()?;

        if let Some(key) = credentials.api_key.clone().filter(|k| !k.is_empty()) {
            let endpoint = format!("{}/models/{}:generateContent", GEMINI_API_BASE, config.model);
            return Some(Self {
                client,
                endpoint,
                auth: GeminiAuth::ApiKey(key),
            });
        }

        if let Some(token) = credentials.access_token.clone().filter(|t| !t.is_empty()) {
            let project = credentials
                .project_id
                .clone()
                .unwrap_or_else(|| config.project_id.clone());
            return Some(Self {
                client,
                endpoint: vertex_endpoint(&config.location, &project, &config.model),
                auth: GeminiAuth::Bearer(token),
            });
        }

        tracing::warn!(
            client_email = credentials.client_email.as_deref().unwrap_or("unknown"),
            "Credentials carry no api_key or access_token, analysis provider disabled"
        );
        None
    }

    /// Build a provider against an explicit endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            auth: GeminiAuth::ApiKey(api_key.into()),
        }
    }
}

fn vertex_endpoint(location: &str, project: &str, model: &str) -> String {
    format!(
        "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent"
    )
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Join the text parts of the first candidate
fn response_text(response: GenerateResponse) -> Result<String, AnalysisError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        match self.auth {
            GeminiAuth::ApiKey(_) => ProviderKind::Gemini,
            GeminiAuth::Bearer(_) => ProviderKind::Vertex,
        }
    }

    async fn analyze(&self, text: &str, label: &str) -> Result<String, AnalysisError> {
        let request = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(text) }]
            }]
        });

        let builder = self.client.post(&self.endpoint).json(&request);
        let builder = match &self.auth {
            GeminiAuth::ApiKey(key) => builder.query(&[("key", key)]),
            GeminiAuth::Bearer(token) => builder.bearer_auth(token),
        };

        tracing::debug!(label = %label, chars = text.chars().count(), "Requesting analysis");
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status { status, body });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        response_text(parsed)
    }
}

/// Provider with a canned outcome, for tests
#[cfg(test)]
pub struct MockProvider {
    pub response: Result<String, String>,
}

#[cfg(test)]
#[async_trait]
impl AnalysisProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn analyze(&self, _text: &str, _label: &str) -> Result<String, AnalysisError> {
        self.response.clone().map_err(AnalysisError::Request)
    }
}
