//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end indexing workflow:
//! 1. Walk the output tree for rendered pages
//! 2. Load each page and its metadata
//! 3. Submit pages to the search provider's worker pool
//! 4. Release the provider (record files + upload)

use std::path::Path;
use std::time::Instant;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::page::load_page;
use crate::core::indexer::FileWalker;
use crate::core::provider::{ReleaseSummary, SearchProvider};
use crate::core::types::IndexStats;

/// Orchestrates the indexing pipeline
pub struct IndexingPipeline {
    walker: FileWalker,
    default_lang: String,
}

impl IndexingPipeline {
    /// Create a pipeline from the configuration
    ///
    /// Record files from earlier runs live in the output tree too;
    /// the walker never enters their directory.
    pub fn new(config: &Config) -> Result<Self> {
        let indexing = &config.indexing;
        let walker = FileWalker::new(
            indexing.include_patterns.clone(),
            indexing.exclude_patterns.clone(),
            indexing.max_file_size_mb,
        )?
        .skip_output_dir(&config.output.search_dir);

        Ok(Self {
            walker,
            default_lang: indexing.default_lang.clone(),
        })
    }

    /// Index every page below `root`
    ///
    /// Record files are written below `root` as well. Pages that
    /// cannot be read are logged and counted as skipped; they don't
    /// stop the run.
    pub async fn index_directory(
        &self,
        root: &Path,
        provider: &SearchProvider,
    ) -> Result<(ReleaseSummary, IndexStats)> {
        let start = Instant::now();

        // Step 1: Collect pages
        tracing::info!("Starting page collection from {:?}", root);
        let files = self.walker.collect_files(root)?;
        tracing::info!("Found {} pages to index", files.len());

        // Step 2: Load and submit pages
        let mut stats = IndexStats {
            pages_found: files.len(),
            ..IndexStats::default()
        };

        for (idx, file_path) in files.iter().enumerate() {
            if idx % 100 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} pages submitted", idx, files.len());
            }

            let page = match load_page(root, file_path, &self.default_lang) {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {}", file_path, e);
                    stats.pages_skipped += 1;
                    continue;
                }
            };

            if provider.add(&page.path, &page.lang, page.info)? {
                stats.pages_submitted += 1;
            } else {
                stats.pages_skipped += 1;
            }
        }

        // Step 3: Wait for workers, write and upload
        let summary = provider.release(root).await?;

        stats.records_created = summary.results.total_records();
        stats.records_by_lang = summary
            .results
            .iter()
            .map(|(lang, records)| (lang.to_string(), records.len()))
            .collect();
        stats.tasks_failed = summary.stats.failed;
        stats.tasks_lost = summary.stats.lost;
        stats.files_written = summary.files.clone();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} pages submitted, {} skipped, \
             {} records created in {}ms",
            stats.pages_submitted,
            stats.pages_skipped,
            stats.records_created,
            stats.duration_ms
        );

        Ok((summary, stats))
    }
}
