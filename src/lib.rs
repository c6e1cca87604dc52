//! docindex - parallel search record builder for documentation sites
//!
//! Turns rendered documentation pages into bounded-size search
//! records, fanning the work out over a pool of worker threads and
//! handing per-language record sets to a search index uploader.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (section splitting, record building, page walking)
//!   - worker (pool coordinator, worker protocol)
//!   - storage (per-language record files)
//!   - upload, provider (search index integration)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Heading-based sectioning with size-bounded chunk records
//! - UTF-8 safe chunking (character-based, never panics)
//! - Crash-tolerant worker pool with a completion barrier
//! - JSON record files compatible with the search index uploader

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{DocIndexError, Result};
pub use core::services::Services;
pub use core::types::*;
