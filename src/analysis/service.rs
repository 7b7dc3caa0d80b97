//! Analysis Service
//!
//! Wraps an optional provider with the graceful-degradation policy: any
//! provider failure, or no provider at all, yields the fallback report.

use std::sync::Arc;

use super::credentials::Credentials;
use super::fallback::fallback_report;
use super::provider::{AnalysisProvider, GeminiProvider};
use super::types::AnalysisError;
use crate::config::AnalysisConfig;

/// Legal-risk analysis that never fails
#[derive(Clone)]
pub struct AnalysisService {
    provider: Option<Arc<dyn AnalysisProvider>>,
}

impl AnalysisService {
    /// Create a service around an explicit provider
    pub fn new(provider: Option<Arc<dyn AnalysisProvider>>) -> Self {
        Self { provider }
    }

    /// Service that always produces the fallback report
    pub fn fallback_only() -> Self {
        Self { provider: None }
    }

    /// Discover credentials and build the hosted provider if possible
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let provider = Credentials::discover(config)
            .and_then(|credentials| GeminiProvider::from_credentials(&credentials, config))
            .map(|provider| {
                tracing::info!(kind = ?provider.kind(), model = %config.model, "Analysis provider ready");
                Arc::new(provider) as Arc<dyn AnalysisProvider>
            });

        Self { provider }
    }

    /// Whether a hosted provider is configured
    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    /// Analyse `text`, falling back to the canned report on any failure
    pub async fn analyze(&self, text: &str, label: &str) -> String {
        match self.try_analyze(text, label).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(label = %label, error = %e, "Analysis provider failed, using fallback report");
                fallback_report(label, text)
            }
        }
    }

    async fn try_analyze(&self, text: &str, label: &str) -> Result<String, AnalysisError> {
        let provider = self.provider.as_ref().ok_or(AnalysisError::NotConfigured)?;
        provider.analyze(text, label).await
    }
}
