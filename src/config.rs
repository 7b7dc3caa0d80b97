//! Configuration management for the VoiceLegal server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub handoff: HandoffConfig,
    pub registry: RegistryConfig,
    pub analysis: AnalysisConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    pub max_bytes: usize,
    /// Budget for PDF text extraction
    pub extract_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandoffConfig {
    /// Extension-to-dashboard transfer TTL
    pub transfer_ttl_secs: u64,
    /// Voice-assistant document context TTL
    pub context_ttl_secs: u64,
    /// Per-store entry bound, 0 = unbounded
    pub max_entries: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// LRU bound on registered documents, 0 = unbounded
    pub max_documents: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub credentials_base64: Option<String>,
    pub credentials_path: Option<PathBuf>,
    pub project_id: String,
    pub location: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed in addition to extension and preview hosts
    pub allowed_origins: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            credentials_base64: None,
            credentials_path: None,
            project_id: "voicelegal-ai".to_string(),
            location: "us-central1".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://localhost:4173".to_string(),
                "http://localhost:8000".to_string(),
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            upload: UploadConfig {
                max_bytes: 10 * 1024 * 1024,
                extract_timeout_secs: 30,
            },
            handoff: HandoffConfig {
                transfer_ttl_secs: 300,
                context_ttl_secs: 1800,
                max_entries: 1000,
            },
            registry: RegistryConfig { max_documents: 100 },
            analysis: AnalysisConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// Parse an environment variable, keeping `default` when unset or invalid
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let defaults = Config::default();

        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.server.port);

        let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(list) => list
                .split(',')
                .map(|o| o.trim().trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            Err(env::VarError::NotPresent) => defaults.cors.allowed_origins,
            Err(e) => return Err(e),
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
            },
            upload: UploadConfig {
                max_bytes: env_parse("MAX_UPLOAD_BYTES", defaults.upload.max_bytes),
                extract_timeout_secs: env_parse(
                    "EXTRACT_TIMEOUT_SECS",
                    defaults.upload.extract_timeout_secs,
                ),
            },
            handoff: HandoffConfig {
                transfer_ttl_secs: env_parse("TRANSFER_TTL_SECS", defaults.handoff.transfer_ttl_secs),
                context_ttl_secs: env_parse("CONTEXT_TTL_SECS", defaults.handoff.context_ttl_secs),
                max_entries: env_parse("HANDOFF_MAX_ENTRIES", defaults.handoff.max_entries),
            },
            registry: RegistryConfig {
                max_documents: env_parse("REGISTRY_MAX_DOCUMENTS", defaults.registry.max_documents),
            },
            analysis: AnalysisConfig {
                credentials_base64: env::var("GOOGLE_CREDENTIALS_BASE64").ok(),
                credentials_path: env::var("GOOGLE_APPLICATION_CREDENTIALS").ok().map(PathBuf::from),
                project_id: env::var("GOOGLE_CLOUD_PROJECT").unwrap_or(defaults.analysis.project_id),
                location: env::var("GOOGLE_CLOUD_LOCATION").unwrap_or(defaults.analysis.location),
                model: env::var("GEMINI_MODEL").unwrap_or(defaults.analysis.model),
                timeout_secs: env_parse("ANALYSIS_TIMEOUT_SECS", defaults.analysis.timeout_secs),
            },
            cors: CorsConfig { allowed_origins },
        })
    }
}
