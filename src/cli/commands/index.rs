//! Index command - build search records for a rendered docs tree

use crate::cli::output::{colors, format_bytes, format_duration, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Output directory of the documentation build
    pub path: PathBuf,

    /// Maximum number of worker threads
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Language for pages outside a language directory
    #[arg(long, short = 'l')]
    pub lang: Option<String>,

    /// Glob patterns to include (can be specified multiple times)
    #[arg(long, short = 'i')]
    pub include: Vec<String>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Log uploads instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Write record files only
    #[arg(long)]
    pub no_upload: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub path: String,
    pub workers: usize,
    pub pages_found: usize,
    pub pages_submitted: usize,
    pub pages_skipped: usize,
    pub records_created: usize,
    pub records_by_lang: BTreeMap<String, usize>,
    pub tasks_failed: usize,
    pub tasks_lost: usize,
    pub files: Vec<String>,
    pub uploaded: Vec<String>,
    pub duration_secs: f64,
}

/// Execute the index command
pub async fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate path
    let path = args.path.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the build output exists.",
            args.path.display(),
            e
        )
    })?;

    if !path.is_dir() {
        return Err(format!("Path '{}' is not a directory.", path.display()).into());
    }

    // Apply command-line overrides
    let mut config = services.config.as_ref().clone();
    if let Some(workers) = args.workers {
        config.workers.max_workers = workers;
    }
    if let Some(lang) = args.lang {
        config.indexing.default_lang = lang;
    }
    if !args.include.is_empty() {
        config.indexing.include_patterns = args.include;
    }
    if !args.exclude.is_empty() {
        config.indexing.exclude_patterns = args.exclude;
    }
    if args.no_upload {
        config.search_index.upload_during_build = false;
    }
    config.validate()?;

    if config.search_index.uploads_enabled() && !args.dry_run {
        print_warning("No search index client configured; records are written but not uploaded");
    }

    let services = Services::new(config);
    let pipeline = services.create_pipeline()?;
    let provider = services.create_provider(super::select_uploader(args.dry_run))?;

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {} with {} workers...",
            colors::file_path(&path.display().to_string()),
            colors::number(&provider.workers().to_string())
        );
    }

    let (summary, stats) = pipeline.index_directory(&path, &provider).await?;

    let response = IndexResponse {
        path: path.to_string_lossy().into_owned(),
        workers: summary.stats.workers,
        pages_found: stats.pages_found,
        pages_submitted: stats.pages_submitted,
        pages_skipped: stats.pages_skipped,
        records_created: stats.records_created,
        records_by_lang: stats.records_by_lang.clone(),
        tasks_failed: stats.tasks_failed,
        tasks_lost: stats.tasks_lost,
        files: stats
            .files_written
            .iter()
            .map(|f| f.to_string_lossy().into_owned())
            .collect(),
        uploaded: summary.uploaded,
        duration_secs: stats.duration_ms as f64 / 1000.0,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} pages ({} records) in {}",
                colors::success("Indexed"),
                colors::number(&response.pages_submitted.to_string()),
                colors::number(&response.records_created.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.pages_skipped > 0 {
                println!(
                    "{}",
                    colors::dim(&format!("Skipped {} pages", response.pages_skipped))
                );
            }
            for (file, (lang, count)) in stats.files_written.iter().zip(&response.records_by_lang) {
                let size = fs::metadata(file).map(|m| m.len()).unwrap_or(0);
                println!(
                    "  {}: {} records -> {} ({})",
                    colors::lang(lang),
                    colors::number(&count.to_string()),
                    colors::file_path(&file.display().to_string()),
                    format_bytes(size)
                );
            }
            if response.tasks_failed > 0 || response.tasks_lost > 0 {
                print_warning(&format!(
                    "{} tasks failed, {} tasks lost",
                    response.tasks_failed, response.tasks_lost
                ));
            }
            if !response.uploaded.is_empty() {
                println!("Uploaded: {}", response.uploaded.join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
