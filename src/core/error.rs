//! Error types and error handling for docindex.
//!
//! A single error enum covers the whole pipeline. Task-level
//! failures (a page that cannot be turned into records) are
//! recoverable and never stop the worker pool; pool setup
//! failures are fatal and propagate to the caller.

use thiserror::Error;

/// Result type alias for docindex operations
pub type Result<T> = std::result::Result<T, DocIndexError>;

/// Main error type for docindex
#[derive(Error, Debug)]
pub enum DocIndexError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    #[error("Failed to spawn worker: {0}")]
    WorkerSpawn(String),

    #[error("Worker pool has been terminated")]
    PoolTerminated,

    #[error("Another caller is already waiting for pool completion")]
    WaiterPending,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl DocIndexError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error only affects a single task
    ///
    /// Such errors are reported back to the pool as an `error`
    /// message and the pool keeps going.
    pub fn is_task_failure(&self) -> bool {
        matches!(
            self,
            DocIndexError::InvalidDocument(_)
                | DocIndexError::ProcessingFailed(_)
                | DocIndexError::SerdeError(_)
        )
    }

    /// Check if this error must abort the run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DocIndexError::WorkerSpawn(_) | DocIndexError::ConfigError(_)
        )
    }
}
