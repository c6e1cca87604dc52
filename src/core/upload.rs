//! Search index upload seam.
//!
//! The third-party search index client lives outside this crate.
//! [`SearchIndexUploader`] is the interface it is driven through;
//! [`DryRunUploader`] logs and records what would be sent.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Mutex;

use crate::core::error::{DocIndexError, Result};
use crate::core::types::Record;

/// How records replace the contents of an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadMethod {
    /// Atomically swap the whole index for the given records
    ReplaceAllObjects,
    /// Add or update the given records, keep the rest
    SaveObjects,
}

impl UploadMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMethod::ReplaceAllObjects => "replaceAllObjects",
            UploadMethod::SaveObjects => "saveObjects",
        }
    }
}

/// Settings applied to an index before records are uploaded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    pub distinct: u32,
    pub attribute_for_distinct: String,
    pub index_languages: Vec<String>,
    /// Configured overrides, applied on top of the defaults
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IndexSettings {
    /// Default settings for a language merged with `overrides`
    pub fn for_lang(lang: &str, overrides: &Map<String, Value>) -> Self {
        let mut languages = vec![lang.to_string()];
        let base = base_lang(lang);
        if base != lang {
            languages.push(base.to_string());
        }

        let mut settings = Self {
            distinct: 1,
            attribute_for_distinct: "url".to_string(),
            index_languages: languages,
            extra: Map::new(),
        };

        for (key, value) in overrides {
            match key.as_str() {
                "distinct" => {
                    if let Some(n) = value.as_u64() {
                        settings.distinct = n as u32;
                    }
                }
                "attributeForDistinct" => {
                    if let Some(s) = value.as_str() {
                        settings.attribute_for_distinct = s.to_string();
                    }
                }
                // Always derived from the language
                "indexLanguages" => {}
                _ => {
                    settings.extra.insert(key.clone(), value.clone());
                }
            }
        }

        settings
    }
}

/// One language's worth of records bound for one index
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub index_name: String,
    pub lang: String,
    pub method: UploadMethod,
    pub settings: IndexSettings,
    pub records: Vec<Record>,
}

/// Client for the external search index
#[async_trait]
pub trait SearchIndexUploader: Send + Sync {
    /// Apply settings, then upload the records
    async fn upload(&self, request: UploadRequest) -> Result<()>;

    /// Apply settings only
    async fn set_settings(&self, index_name: &str, settings: IndexSettings) -> Result<()>;

    /// Remove every record from an index
    async fn clear_objects(&self, index_name: &str) -> Result<()>;
}

/// Uploader that only logs, keeping a copy of every request
#[derive(Debug, Default)]
pub struct DryRunUploader {
    requests: Mutex<Vec<UploadRequest>>,
}

impl DryRunUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<UploadRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchIndexUploader for DryRunUploader {
    async fn upload(&self, request: UploadRequest) -> Result<()> {
        tracing::info!(
            "[dry-run] {} {} records to {} (lang {})",
            request.method.as_str(),
            request.records.len(),
            request.index_name,
            request.lang
        );
        self.requests
            .lock()
            .map_err(|_| DocIndexError::UploadFailed("Dry-run log poisoned".to_string()))?
            .push(request);
        Ok(())
    }

    async fn set_settings(&self, index_name: &str, settings: IndexSettings) -> Result<()> {
        tracing::info!(
            "[dry-run] setSettings on {} (languages {:?})",
            index_name,
            settings.index_languages
        );
        Ok(())
    }

    async fn clear_objects(&self, index_name: &str) -> Result<()> {
        tracing::info!("[dry-run] clearObjects on {}", index_name);
        Ok(())
    }
}

/// Analyzer language family: Cyrillic-script languages share `ru`
pub fn base_lang(lang: &str) -> &'static str {
    match lang {
        "ru" | "be" | "kz" | "ua" => "ru",
        _ => "en",
    }
}

/// Index name for a language
pub fn index_name(prefix: &str, lang: &str) -> String {
    format!("{prefix}-{lang}")
}

/// Location of the rendered search page for a language
pub fn page_link(lang: &str) -> String {
    format!("_search/{lang}/index.html")
}
