//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show all configuration including patterns and query settings
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    #[serde(flatten)]
    pub config: &'a crate::core::config::Config,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();

    let xdg = crate::core::xdg::XdgDirs::new();
    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!(
                "  config_file: {}",
                colors::file_path(&response.config_file)
            );
            println!("  indexing:");
            println!("    chunk_size: {}", config.indexing.chunk_size);
            println!("    max_record_size: {}", config.indexing.max_record_size);
            println!(
                "    max_document_record_size: {}",
                config.indexing.max_document_record_size
            );
            println!("    plain_text_limit: {}", config.indexing.plain_text_limit);
            println!("    default_lang: {}", config.indexing.default_lang);
            if args.all {
                println!("    include: {:?}", config.indexing.include_patterns);
                println!("    exclude: {:?}", config.indexing.exclude_patterns);
                println!("    max_file_size_mb: {}", config.indexing.max_file_size_mb);
            }
            println!("  workers:");
            println!("    max_workers: {}", config.workers.max_workers);
            println!("  output:");
            println!("    search_dir: {}", config.output.search_dir.display());
            println!("  search_index:");
            println!("    app_id: {}", config.search_index.app_id);
            println!(
                "    index_prefix: {}",
                config.search_index.resolved_index_prefix()
            );
            println!("    index: {}", config.search_index.index);
            println!(
                "    upload_during_build: {}",
                config.search_index.upload_during_build
            );
            println!(
                "    api_key: {}",
                if config.search_index.api_key.is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            if args.all {
                println!("    api: {}", config.search_index.api);
                println!(
                    "    query_settings: {}",
                    serde_json::to_string(&config.search_index.query_settings)?
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
