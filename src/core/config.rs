//! Configuration management for docindex.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{DocIndexError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub workers: WorkersConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub search_index: SearchIndexConfig,
}

/// Record building configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Characters per chunk when an oversized record is split
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Byte ceiling for a sectioned record's JSON
    #[serde(default = "default_max_record_size")]
    pub max_record_size: usize,

    /// Byte ceiling for the whole-page record of a page without sections
    #[serde(default = "default_max_document_record_size")]
    pub max_document_record_size: usize,

    /// Characters of page text kept for a whole-page record
    #[serde(default = "default_plain_text_limit")]
    pub plain_text_limit: usize,

    /// Language for pages outside a language directory
    #[serde(default = "default_lang")]
    pub default_lang: String,

    /// Maximum page size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// Page patterns to include (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// Page patterns to exclude (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkersConfig {
    /// Upper bound on worker threads (capped at CPUs - 1)
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

/// Record file output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for per-language record files, relative to the output root
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,
}

/// External search index settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchIndexConfig {
    #[serde(default)]
    pub app_id: String,

    /// Write key; never printed
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Public search-only key handed to the client
    #[serde(default = "default_search_key")]
    pub search_key: String,

    /// Index name, optionally with a `-{lang}` placeholder
    #[serde(default)]
    pub index_name: Option<String>,

    #[serde(default)]
    pub index_prefix: Option<String>,

    /// Master switch for indexing
    #[serde(default = "default_true")]
    pub index: bool,

    /// Upload records at the end of a build
    #[serde(default = "default_true")]
    pub upload_during_build: bool,

    /// Client API script location
    #[serde(default = "default_api")]
    pub api: String,

    /// Extra index settings merged over the defaults
    #[serde(default)]
    pub index_settings: Map<String, Value>,

    /// Client-side query settings
    #[serde(default)]
    pub query_settings: Map<String, Value>,
}

// Default value functions
fn default_chunk_size() -> usize {
    4000
}

fn default_max_record_size() -> usize {
    9600
}

fn default_max_document_record_size() -> usize {
    10000
}

fn default_plain_text_limit() -> usize {
    5000
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_max_file_size() -> usize {
    10
}

fn default_include_patterns() -> Vec<String> {
    vec!["*.html".to_string(), "*.htm".to_string()]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "_assets".to_string(),
        "_bundle".to_string(),
        "node_modules".to_string(),
    ]
}

fn default_max_workers() -> usize {
    4
}

fn default_search_dir() -> PathBuf {
    PathBuf::from("_search")
}

fn default_search_key() -> String {
    "search-api-key".to_string()
}

fn default_true() -> bool {
    true
}

fn default_api() -> String {
    "_search/api.js".to_string()
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_record_size: default_max_record_size(),
            max_document_record_size: default_max_document_record_size(),
            plain_text_limit: default_plain_text_limit(),
            default_lang: default_lang(),
            max_file_size_mb: default_max_file_size(),
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            search_dir: default_search_dir(),
        }
    }
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            api_key: None,
            search_key: default_search_key(),
            index_name: None,
            index_prefix: None,
            index: default_true(),
            upload_during_build: default_true(),
            api: default_api(),
            index_settings: Map::new(),
            query_settings: Map::new(),
        }
    }
}

impl SearchIndexConfig {
    /// Prefix that per-language index names are built from
    ///
    /// An explicit prefix wins; otherwise the index name is used
    /// with any `-{lang}` placeholder removed, falling back to
    /// `docs`.
    pub fn resolved_index_prefix(&self) -> String {
        if let Some(prefix) = self.index_prefix.as_deref().filter(|p| !p.is_empty()) {
            return prefix.to_string();
        }
        match self.index_name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => name.replace("-{lang}", ""),
            None => "docs".to_string(),
        }
    }

    /// True when records should be pushed to the search index
    pub fn uploads_enabled(&self) -> bool {
        self.index && self.upload_during_build
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocIndexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. DOCINDEX_CONFIG env var
    /// 2. XDG config file (~/.config/docindex/config.toml)
    /// 3. ./docindex.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DOCINDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("docindex.toml").exists() {
                Self::from_file("docindex.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(chunk_size) = env::var("DOCINDEX_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.indexing.chunk_size = size;
            }
        }
        if let Ok(max_size) = env::var("DOCINDEX_MAX_RECORD_SIZE") {
            if let Ok(size) = max_size.parse() {
                self.indexing.max_record_size = size;
            }
        }
        if let Ok(lang) = env::var("DOCINDEX_DEFAULT_LANG") {
            if !lang.is_empty() {
                self.indexing.default_lang = lang;
            }
        }

        // Worker configuration
        if let Ok(workers) = env::var("DOCINDEX_MAX_WORKERS") {
            if let Ok(n) = workers.parse() {
                self.workers.max_workers = n;
            }
        }

        // Search index configuration
        if let Ok(app_id) = env::var("DOCINDEX_APP_ID") {
            self.search_index.app_id = app_id;
        }
        if let Ok(api_key) = env::var("DOCINDEX_API_KEY") {
            self.search_index.api_key = Some(api_key).filter(|k| !k.is_empty());
        }
        if let Ok(index_name) = env::var("DOCINDEX_INDEX_NAME") {
            self.search_index.index_name = Some(index_name).filter(|n| !n.is_empty());
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.chunk_size == 0 {
            return Err(DocIndexError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.indexing.max_record_size == 0 {
            return Err(DocIndexError::ConfigError(
                "Max record size must be non-zero".to_string(),
            ));
        }

        if self.indexing.max_document_record_size < self.indexing.max_record_size {
            return Err(DocIndexError::ConfigError(
                "Max document record size cannot be below max record size".to_string(),
            ));
        }

        if self.indexing.plain_text_limit == 0 {
            return Err(DocIndexError::ConfigError(
                "Plain text limit must be non-zero".to_string(),
            ));
        }

        if self.indexing.default_lang.trim().is_empty() {
            return Err(DocIndexError::ConfigError(
                "Default language cannot be empty".to_string(),
            ));
        }

        if self.workers.max_workers == 0 {
            return Err(DocIndexError::ConfigError(
                "Max workers must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chunk size: {} chars", self.indexing.chunk_size);
        tracing::info!("  Max record size: {} bytes", self.indexing.max_record_size);
        tracing::info!(
            "  Max page record size: {} bytes",
            self.indexing.max_document_record_size
        );
        tracing::info!("  Default lang: {}", self.indexing.default_lang);
        tracing::info!("  Max workers: {}", self.workers.max_workers);
        tracing::info!("  Search dir: {:?}", self.output.search_dir);
        tracing::info!(
            "  Index prefix: {}",
            self.search_index.resolved_index_prefix()
        );
        tracing::info!(
            "  API key: {}",
            if self.search_index.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
    }
}
