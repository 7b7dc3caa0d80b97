//! Application state management

use std::num::NonZeroUsize;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::analysis::AnalysisService;
use crate::config::Config;
use crate::extract::{MupdfExtractor, TextExtractor};
use crate::store::{DocumentRegistry, ExpiringStore, ExpiringStoreConfig};

/// Voice-assistant context stored per conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContext {
    pub analysis: Option<serde_json::Value>,
    pub filename: Option<String>,
}

/// A processed upload kept in the document registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doc_id: String,
    pub filename: String,
    /// Leading excerpt of the extracted text
    pub document_text: String,
    pub full_analysis: String,
    /// RFC 3339 upload time (UTC)
    pub uploaded_at: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    transfers: ExpiringStore<serde_json::Value>,
    contexts: ExpiringStore<DocumentContext>,
    documents: DocumentRegistry<DocumentRecord>,
    extractor: Arc<dyn TextExtractor>,
    analysis: AnalysisService,
}

impl AppState {
    /// Create the production state: MuPDF extraction and the configured provider
    pub fn new(config: Config) -> Self {
        let analysis = AnalysisService::from_config(&config.analysis);
        let extractor = Arc::new(MupdfExtractor::with_timeout(config.upload.extract_timeout_secs));
        Self::with_components(config, extractor, analysis)
    }

    /// Create state around explicit collaborators
    pub fn with_components(
        config: Config,
        extractor: Arc<dyn TextExtractor>,
        analysis: AnalysisService,
    ) -> Self {
        let max_entries = Some(config.handoff.max_entries).filter(|max| *max > 0);

        let transfers = ExpiringStore::new(
            "transfers",
            ExpiringStoreConfig {
                ttl: Duration::from_secs(config.handoff.transfer_ttl_secs),
                max_entries,
            },
        );
        let contexts = ExpiringStore::new(
            "contexts",
            ExpiringStoreConfig {
                ttl: Duration::from_secs(config.handoff.context_ttl_secs),
                max_entries,
            },
        );
        let documents = DocumentRegistry::new(NonZeroUsize::new(config.registry.max_documents));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                transfers,
                contexts,
                documents,
                extractor,
                analysis,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Extension-to-dashboard one-shot transfer store
    pub fn transfers(&self) -> &ExpiringStore<serde_json::Value> {
        &self.inner.transfers
    }

    /// Voice-assistant document context store
    pub fn contexts(&self) -> &ExpiringStore<DocumentContext> {
        &self.inner.contexts
    }

    pub fn documents(&self) -> &DocumentRegistry<DocumentRecord> {
        &self.inner.documents
    }

    pub fn extractor(&self) -> &dyn TextExtractor {
        self.inner.extractor.as_ref()
    }

    pub fn analysis(&self) -> &AnalysisService {
        &self.inner.analysis
    }
}
