//! Unified service container for docindex
//!
//! Provides shared access to configuration and builds the
//! per-run pipeline and provider.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::IndexingPipeline;
use crate::core::provider::SearchProvider;
use crate::core::upload::SearchIndexUploader;
use std::sync::Arc;

/// Unified services container
///
/// All CLI commands use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create an IndexingPipeline from the configured patterns
    pub fn create_pipeline(&self) -> Result<IndexingPipeline> {
        IndexingPipeline::new(&self.config)
    }

    /// Create a SearchProvider with a fresh worker pool
    ///
    /// Pools are single-use, so every run needs its own provider.
    /// Must be called from within a tokio runtime.
    pub fn create_provider(
        &self,
        uploader: Option<Arc<dyn SearchIndexUploader>>,
    ) -> Result<SearchProvider> {
        SearchProvider::new(self.config.as_ref().clone(), uploader)
    }
}
