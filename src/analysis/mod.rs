//! Analysis Module
//!
//! Sends extracted document text to a hosted generative model for legal-risk
//! analysis. Provider failures are swallowed and replaced by a deterministic
//! fallback report, so the HTTP layer never sees them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voicelegal_server::analysis::AnalysisService;
//!
//! let service = AnalysisService::from_config(&config.analysis);
//! let report = service.analyze(&text, "lease.pdf").await;
//! ```

mod credentials;
mod fallback;
mod provider;
mod service;
mod types;

pub use credentials::{CredentialSource, Credentials, CredentialsError, DEFAULT_KEY_FILE};
pub use fallback::{fallback_report, word_count};
pub use provider::{build_prompt, AnalysisProvider, GeminiProvider, MAX_PROMPT_CHARS};
pub use service::AnalysisService;
pub use types::{AnalysisError, ProviderKind};
