//! Search provider: the build-facing entry point.
//!
//! Pages are handed over one at a time with [`SearchProvider::add`]
//! while a documentation build renders them. [`SearchProvider::release`]
//! waits for the worker pool, writes one record file per language
//! and uploads the records when uploads are enabled.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::error::{DocIndexError, Result};
use crate::core::indexer::{PageInfo, RecordLimits};
use crate::core::storage::RecordStore;
use crate::core::types::{Document, Record, ResultSet};
use crate::core::upload::{
    index_name, page_link, IndexSettings, SearchIndexUploader, UploadMethod, UploadRequest,
};
use crate::core::worker::{HtmlProcessor, PoolStats, WorkerPool};

/// Client-side search configuration for one language
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub provider: String,
    pub api: String,
    pub link: String,
    pub app_id: String,
    pub index_name: String,
    pub search_key: String,
    pub query_settings: Map<String, Value>,
}

/// Outcome of [`SearchProvider::release`]
#[derive(Debug, Clone)]
pub struct ReleaseSummary {
    pub results: ResultSet,
    pub stats: PoolStats,
    /// Record files written, one per language
    pub files: Vec<PathBuf>,
    /// Languages uploaded to the search index
    pub uploaded: Vec<String>,
}

pub struct SearchProvider {
    config: Config,
    index_prefix: String,
    pool: WorkerPool,
    uploader: Option<Arc<dyn SearchIndexUploader>>,
}

impl SearchProvider {
    /// Create a provider and start its worker pool.
    ///
    /// `uploader` is `None` when no search index client is
    /// configured; records are then only written to disk. An invalid
    /// config fails with `ConfigError` before any worker starts.
    pub fn new(config: Config, uploader: Option<Arc<dyn SearchIndexUploader>>) -> Result<Self> {
        config.validate()?;

        if config.search_index.app_id.is_empty() {
            tracing::warn!("Search index appId is not specified");
        }
        if config.search_index.index_name.is_none() && config.search_index.index_prefix.is_none() {
            tracing::warn!("Index name is not specified, using default prefix \"docs\"");
        }

        let index_prefix = config.search_index.resolved_index_prefix();
        tracing::info!("Using index prefix: {}", index_prefix);

        let processor = Arc::new(HtmlProcessor::new(RecordLimits::from(&config.indexing)));
        let pool = WorkerPool::initialize(config.workers.max_workers, processor)?;

        Ok(Self {
            config,
            index_prefix,
            pool,
            uploader,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index_prefix(&self) -> &str {
        &self.index_prefix
    }

    /// Number of pool workers
    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Submit a rendered page.
    ///
    /// Returns `false` when the page was skipped because its HTML is
    /// empty or it is marked `noIndex`.
    pub fn add(&self, path: &str, lang: &str, page: PageInfo) -> Result<bool> {
        if page.html.trim().is_empty() {
            tracing::debug!("Skipping empty page {}", path);
            return Ok(false);
        }
        if page.meta.no_index {
            tracing::debug!("Skipping noIndex page {}", path);
            return Ok(false);
        }

        let document = Document::new(path, lang, page.html)
            .with_title(page.title)
            .with_meta(page.meta);
        self.pool.add_task(document)?;
        Ok(true)
    }

    /// Finish the build: drain the pool, write record files and
    /// upload them with `saveObjects`.
    ///
    /// Upload failures propagate; files already written stay on disk.
    pub async fn release(&self, output_root: &Path) -> Result<ReleaseSummary> {
        let results = self.pool.wait_for_completion().await?;
        let stats = self.pool.terminate().await?;

        let store = RecordStore::new(output_root.join(&self.config.output.search_dir));
        let files = store.write_result_set(&results)?;

        let mut uploaded = Vec::new();
        if self.config.search_index.uploads_enabled() {
            if let Some(uploader) = &self.uploader {
                for (lang, records) in results.iter() {
                    self.upload(uploader.as_ref(), lang, records.to_vec(), UploadMethod::SaveObjects)
                        .await?;
                    uploaded.push(lang.to_string());
                }
            }
        }

        tracing::info!(
            "Released {} records in {} languages",
            results.total_records(),
            files.len()
        );

        Ok(ReleaseSummary {
            results,
            stats,
            files,
            uploaded,
        })
    }

    /// Re-upload previously written record files with
    /// `replaceAllObjects`. Returns the languages uploaded.
    pub async fn add_objects(&self, search_dir: &Path) -> Result<Vec<String>> {
        if !self.config.search_index.uploads_enabled() {
            tracing::info!("Uploads disabled, nothing to do");
            return Ok(Vec::new());
        }
        let uploader = self.ensure_uploader()?;

        let store = RecordStore::new(search_dir);
        let mut uploaded = Vec::new();
        for (lang, path) in store.discover()? {
            let records = crate::core::storage::load_records(&path)?;
            self.upload(uploader, &lang, records, UploadMethod::ReplaceAllObjects)
                .await?;
            uploaded.push(lang);
        }
        Ok(uploaded)
    }

    /// Apply index settings to the index of every given language
    pub async fn set_settings(&self, langs: &[String], overrides: &Map<String, Value>) -> Result<()> {
        if !self.config.search_index.uploads_enabled() {
            return Ok(());
        }
        let uploader = self.ensure_uploader()?;
        for lang in langs {
            let name = index_name(&self.index_prefix, lang);
            uploader
                .set_settings(&name, IndexSettings::for_lang(lang, overrides))
                .await?;
        }
        Ok(())
    }

    /// Remove all records from the index of every given language
    pub async fn clear_index(&self, langs: &[String]) -> Result<()> {
        if !self.config.search_index.uploads_enabled() {
            return Ok(());
        }
        let uploader = self.ensure_uploader()?;
        for lang in langs {
            uploader
                .clear_objects(&index_name(&self.index_prefix, lang))
                .await?;
        }
        Ok(())
    }

    /// Search configuration handed to the client for `lang`
    pub fn client_config(&self, lang: &str) -> ClientConfig {
        let search = &self.config.search_index;
        ClientConfig {
            provider: "algolia".to_string(),
            api: search.api.clone(),
            link: page_link(lang),
            app_id: search.app_id.clone(),
            index_name: index_name(&self.index_prefix, lang),
            search_key: search.search_key.clone(),
            query_settings: search.query_settings.clone(),
        }
    }

    async fn upload(
        &self,
        uploader: &dyn SearchIndexUploader,
        lang: &str,
        records: Vec<Record>,
        method: UploadMethod,
    ) -> Result<()> {
        let name = index_name(&self.index_prefix, lang);
        tracing::info!("Name: {}, Lang: {}, Records: {}", name, lang, records.len());

        let count = records.len();
        uploader
            .upload(UploadRequest {
                index_name: name.clone(),
                lang: lang.to_string(),
                method,
                settings: IndexSettings::for_lang(lang, &self.config.search_index.index_settings),
                records,
            })
            .await
            .map_err(|e| {
                tracing::error!("Error updating index {}: {}", name, e);
                e
            })?;

        tracing::info!("Index {} updated with {} records", name, count);
        Ok(())
    }

    fn ensure_uploader(&self) -> Result<&dyn SearchIndexUploader> {
        self.uploader.as_deref().ok_or_else(|| {
            DocIndexError::UploadFailed(
                "Search index client not initialized. Please provide an API key.".to_string(),
            )
        })
    }
}
