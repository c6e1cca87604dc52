//! Core domain logic (CLI-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Documents, sections, records and result sets
//! - **xdg**: XDG directory handling
//! - **indexer**: Section splitting, record building, page walking
//! - **worker**: Parallel worker pool and its message protocol
//! - **storage**: Per-language record files
//! - **upload**: Search index upload seam
//! - **provider**: Build-facing search provider
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod provider;
pub mod services;
pub mod storage;
pub mod types;
pub mod upload;
pub mod worker;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{DocIndexError, Result};
pub use services::Services;
