//! Core data types for docindex.
//!
//! Documents flow in, search records flow out. Record field names
//! are fixed by the per-language JSON files consumed by the search
//! index uploader, so their serde names must not change.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Page metadata carried alongside the rendered HTML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Page opted out of indexing
    #[serde(default)]
    pub no_index: bool,

    /// Keywords copied onto every record of the page
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Title from front matter, used when the page has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unrecognized metadata fields, kept for forward compatibility
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A rendered page submitted for record extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source path, e.g. `en/guide/install.md`
    pub path: String,

    /// Language code the records are grouped under
    pub lang: String,

    /// Rendered HTML body
    pub html: String,

    /// Page title (may be empty)
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub meta: DocumentMeta,
}

impl Document {
    /// Create a document with empty title and metadata
    pub fn new(path: impl Into<String>, lang: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lang: lang.into(),
            html: html.into(),
            title: String::new(),
            meta: DocumentMeta::default(),
        }
    }

    /// Set the page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the page metadata
    pub fn with_meta(mut self, meta: DocumentMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// A run of top-level blocks between two headings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text (empty for content before the first heading)
    pub heading: String,

    /// Heading level 1-6, 0 for the untitled leading section
    pub level: u8,

    /// `id` attribute of the heading element, or empty
    pub anchor: String,

    /// Accumulated text of the section's non-heading blocks
    pub content: String,
}

/// One indexable unit of page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "objectID")]
    pub object_id: String,

    pub title: String,

    pub content: String,

    pub headings: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    pub url: String,

    pub lang: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Records accumulated per language
///
/// Within a language, records keep the order in which they were
/// merged. Languages iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    by_lang: BTreeMap<String, Vec<Record>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records, each under its own `lang` field
    pub fn merge(&mut self, records: Vec<Record>) {
        for record in records {
            self.by_lang
                .entry(record.lang.clone())
                .or_default()
                .push(record);
        }
    }

    /// Records for a language, if any were merged
    pub fn get(&self, lang: &str) -> Option<&[Record]> {
        self.by_lang.get(lang).map(Vec::as_slice)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.by_lang.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.by_lang
            .iter()
            .map(|(lang, records)| (lang.as_str(), records.as_slice()))
    }

    /// Total number of records across all languages
    pub fn total_records(&self) -> usize {
        self.by_lang.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_lang.is_empty()
    }
}

/// Statistics from indexing a directory of rendered pages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// HTML files found by the walker
    pub pages_found: usize,

    /// Pages handed to the worker pool
    pub pages_submitted: usize,

    /// Pages skipped (empty, `noindex`, unreadable)
    pub pages_skipped: usize,

    /// Records produced across all languages
    pub records_created: usize,

    /// Records per language
    pub records_by_lang: BTreeMap<String, usize>,

    /// Tasks that reported an error
    pub tasks_failed: usize,

    /// Tasks lost to worker crashes
    pub tasks_lost: usize,

    /// Record files written
    pub files_written: Vec<PathBuf>,

    /// Indexing duration in milliseconds
    pub duration_ms: u64,
}
