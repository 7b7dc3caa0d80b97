//! Provider credential bootstrapping
//!
//! Credentials come from, in order:
//! 1. a base64-encoded JSON blob (`GOOGLE_CREDENTIALS_BASE64`)
//! 2. an explicit credentials file path (`GOOGLE_APPLICATION_CREDENTIALS`)
//! 3. `./key.json` in the working directory
//!
//! If none is usable, real analysis is disabled and every request gets the
//! fallback report.

use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Deserialize;

use crate::config::AnalysisConfig;

/// Credentials file picked up when nothing else is configured
pub const DEFAULT_KEY_FILE: &str = "./key.json";

/// Where credentials were found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Base64(String),
    File(PathBuf),
    None,
}

impl CredentialSource {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        if let Some(blob) = config.credentials_base64.as_ref().filter(|b| !b.trim().is_empty()) {
            return Self::Base64(blob.trim().to_string());
        }
        if let Some(path) = &config.credentials_path {
            return Self::File(path.clone());
        }
        if Path::new(DEFAULT_KEY_FILE).exists() {
            return Self::File(PathBuf::from(DEFAULT_KEY_FILE));
        }
        Self::None
    }

    fn describe(&self) -> String {
        match self {
            Self::Base64(_) => "environment variable".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::None => "none".to_string(),
        }
    }
}

/// The subset of a credentials JSON document the providers use
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    /// Generative Language API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Pre-minted OAuth bearer token for Vertex AI
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Invalid base64 credentials: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Credentials are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid credentials JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Credentials {
    /// Parse credentials from a JSON document
    pub fn from_json(json: &str) -> Result<Self, CredentialsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load credentials from a source; `Ok(None)` when there is no source
    pub fn load(source: &CredentialSource) -> Result<Option<Self>, CredentialsError> {
        let json = match source {
            CredentialSource::Base64(blob) => {
                let decoded = base64::engine::general_purpose::STANDARD.decode(blob)?;
                String::from_utf8(decoded)?
            }
            CredentialSource::File(path) => std::fs::read_to_string(path)?,
            CredentialSource::None => return Ok(None),
        };

        Self::from_json(&json).map(Some)
    }

    /// Resolve and load credentials, logging instead of failing
    pub fn discover(config: &AnalysisConfig) -> Option<Self> {
        let source = CredentialSource::from_config(config);

        match Self::load(&source) {
            Ok(Some(credentials)) => {
                tracing::info!(source = %source.describe(), "Loaded analysis credentials");
                Some(credentials)
            }
            Ok(None) => {
                tracing::warn!("No analysis credentials found, fallback reports only");
                None
            }
            Err(e) => {
                tracing::warn!(source = %source.describe(), error = %e, "Failed to load analysis credentials");
                None
            }
        }
    }
}
