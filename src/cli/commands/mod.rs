//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command.

pub mod client_config;
pub mod completions;
pub mod config;
pub mod index;
pub mod upload;

// Re-export argument types for use in mod.rs
pub use client_config::ClientConfigArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use index::IndexArgs;
pub use upload::UploadArgs;

use crate::core::upload::{DryRunUploader, SearchIndexUploader};
use std::sync::Arc;

/// Uploader for a command run
///
/// Only the dry-run uploader ships with docindex; without it records
/// are written to disk and nothing is uploaded.
pub(crate) fn select_uploader(dry_run: bool) -> Option<Arc<dyn SearchIndexUploader>> {
    if dry_run {
        Some(Arc::new(DryRunUploader::new()))
    } else {
        None
    }
}
