//! Per-language record files.
//!
//! Records of one language are stored as a pretty-printed JSON array
//! in `{search_dir}/{lang}-algolia.json`. The same files are read
//! back by the re-upload mode.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{DocIndexError, Result};
use crate::core::types::{Record, ResultSet};

/// File name suffix after the language code
pub const RECORDS_FILE_SUFFIX: &str = "-algolia.json";

static RECORDS_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]{2})-algolia\.json$").expect("records file regex"));

/// Reads and writes record files below one directory
#[derive(Debug, Clone)]
pub struct RecordStore {
    search_dir: PathBuf,
}

impl RecordStore {
    pub fn new(search_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: search_dir.into(),
        }
    }

    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }

    /// Record file path for a language
    pub fn file_path(&self, lang: &str) -> PathBuf {
        self.search_dir.join(format!("{lang}{RECORDS_FILE_SUFFIX}"))
    }

    /// Write the records of one language, replacing any previous file
    pub fn write(&self, lang: &str, records: &[Record]) -> Result<PathBuf> {
        fs::create_dir_all(&self.search_dir).map_err(|e| {
            DocIndexError::StorageError(format!(
                "Failed to create {:?}: {e}",
                self.search_dir
            ))
        })?;

        let path = self.file_path(lang);
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&path, json)
            .map_err(|e| DocIndexError::StorageError(format!("Failed to write {path:?}: {e}")))?;

        tracing::info!("Wrote {} {} records to {:?}", records.len(), lang, path);
        Ok(path)
    }

    /// Write one file per language of the result set
    pub fn write_result_set(&self, results: &ResultSet) -> Result<Vec<PathBuf>> {
        results
            .iter()
            .map(|(lang, records)| self.write(lang, records))
            .collect()
    }

    /// Load the records of one language
    pub fn load(&self, lang: &str) -> Result<Vec<Record>> {
        load_records(&self.file_path(lang))
    }

    /// Record files present in the directory as `(lang, path)`,
    /// sorted by language. Names not matching `{xx}-algolia.json`
    /// are ignored.
    pub fn discover(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.search_dir).map_err(|e| {
            DocIndexError::StorageError(format!("Failed to read {:?}: {e}", self.search_dir))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(captures) = RECORDS_FILE.captures(name) {
                files.push((captures[1].to_string(), entry.path()));
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Parse a record file
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DocIndexError::StorageError(format!("Failed to read {path:?}: {e}")))?;
    let records = serde_json::from_str(&contents)?;
    Ok(records)
}
