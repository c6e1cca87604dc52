//! Upload command - re-upload record files written by `index`

use crate::cli::output::{colors, print_success};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the upload command
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Output directory of the documentation build
    pub path: PathBuf,

    /// Log uploads instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

/// Upload result response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub search_dir: String,
    pub index_prefix: String,
    pub uploaded: Vec<String>,
}

/// Execute the upload command
pub async fn execute(
    args: UploadArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let search_dir = args.path.join(&services.config.output.search_dir);
    if !search_dir.is_dir() {
        return Err(format!(
            "No record files found: '{}' does not exist. Run `docindex index` first.",
            search_dir.display()
        )
        .into());
    }

    let provider = services.create_provider(super::select_uploader(args.dry_run))?;
    let uploaded = provider.add_objects(&search_dir).await?;

    let response = UploadResponse {
        search_dir: search_dir.to_string_lossy().into_owned(),
        index_prefix: provider.index_prefix().to_string(),
        uploaded,
    };

    match format {
        OutputFormat::Human => {
            if response.uploaded.is_empty() {
                println!("Nothing uploaded");
            } else {
                print_success(&format!(
                    "Uploaded {} languages to {}-*",
                    response.uploaded.len(),
                    response.index_prefix
                ));
                for lang in &response.uploaded {
                    println!("  {}", colors::lang(lang));
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
