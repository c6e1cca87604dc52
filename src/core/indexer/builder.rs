//! Record building and size enforcement.
//!
//! Turns the sections of one document into search records. Every
//! record whose serialized JSON reaches the configured ceiling is
//! replaced by a chunk family: consecutive slices of its content,
//! each carrying an `-chunk-<n>` suffixed object ID.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::IndexingConfig;
use crate::core::error::{DocIndexError, Result};
use crate::core::indexer::chunker::Chunker;
use crate::core::indexer::html::{extract_headings, plain_text};
use crate::core::indexer::splitter::SplitDocument;
use crate::core::types::{Document, Record};

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\w+$").expect("extension regex"));

/// Size limits applied while building records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLimits {
    /// Characters per chunk when an oversized record is split
    pub chunk_size: usize,

    /// Byte ceiling for sectioned records
    pub max_record_size: usize,

    /// Byte ceiling for the single whole-page record
    pub max_document_record_size: usize,

    /// Characters of page text kept for the whole-page record
    pub plain_text_limit: usize,
}

impl Default for RecordLimits {
    fn default() -> Self {
        Self::from(&IndexingConfig::default())
    }
}

impl From<&IndexingConfig> for RecordLimits {
    fn from(config: &IndexingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            max_record_size: config.max_record_size,
            max_document_record_size: config.max_document_record_size,
            plain_text_limit: config.plain_text_limit,
        }
    }
}

/// Builds search records for a split document
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    limits: RecordLimits,
    chunker: Chunker,
}

impl RecordBuilder {
    /// # Panics
    ///
    /// Panics if `limits.chunk_size` is 0.
    pub fn new(limits: RecordLimits) -> Self {
        Self {
            chunker: Chunker::new(limits.chunk_size),
            limits,
        }
    }

    /// Build the records of one document.
    ///
    /// With no sections, the whole page becomes one record keyed by
    /// the path stem. Otherwise section `i` becomes record
    /// `<stem>-<i>`. Oversized records are replaced by their chunk
    /// family in place, so output order follows section order.
    pub fn build(&self, document: &Document, split: &SplitDocument) -> Result<Vec<Record>> {
        if document.path.trim().is_empty() {
            return Err(DocIndexError::InvalidDocument(
                "document path is empty".to_string(),
            ));
        }
        if document.lang.trim().is_empty() {
            return Err(DocIndexError::InvalidDocument(format!(
                "document {} has no language",
                document.path
            )));
        }

        let title = resolve_title(document, &split.main_heading);
        let stem = strip_extension(&document.path);
        let url = page_url(&document.path);
        let keywords = document.meta.keywords.clone();

        let mut records = Vec::new();

        if split.sections.is_empty() {
            let record = Record {
                object_id: stem.to_string(),
                title,
                content: plain_text(&document.html)
                    .chars()
                    .take(self.limits.plain_text_limit)
                    .collect(),
                headings: extract_headings(&document.html),
                keywords,
                anchor: Some(String::new()),
                url,
                lang: document.lang.clone(),
                section: None,
            };
            self.push_bounded(record, self.limits.max_document_record_size, &mut records)?;
            return Ok(records);
        }

        for (index, section) in split.sections.iter().enumerate() {
            let record = Record {
                object_id: format!("{stem}-{index}"),
                title: title.clone(),
                content: section.content.trim().to_string(),
                headings: vec![section.heading.clone()],
                keywords: keywords.clone(),
                anchor: Some(section.anchor.clone()),
                url: url.clone(),
                lang: document.lang.clone(),
                section: (!section.heading.is_empty()).then(|| section.heading.clone()),
            };
            self.push_bounded(record, self.limits.max_record_size, &mut records)?;
        }

        Ok(records)
    }

    fn push_bounded(&self, record: Record, ceiling: usize, out: &mut Vec<Record>) -> Result<()> {
        let size = record_size(&record)?;
        if size < ceiling {
            out.push(record);
            return Ok(());
        }

        tracing::debug!(
            "Record {} is {} bytes (limit {}), splitting",
            record.object_id,
            size,
            ceiling
        );
        let start = out.len();
        split_and_push_large_record(record, out, &self.chunker);

        for chunk in &out[start..] {
            let chunk_size = record_size(chunk)?;
            if chunk_size >= ceiling {
                tracing::warn!(
                    "Chunk {} is still {} bytes (limit {})",
                    chunk.object_id,
                    chunk_size,
                    ceiling
                );
            }
        }
        Ok(())
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(RecordLimits::default())
    }
}

/// Serialized size of a record: UTF-8 bytes of its JSON form.
pub fn record_size(record: &Record) -> Result<usize> {
    Ok(serde_json::to_vec(record)?.len())
}

/// Push `record` onto `out`, split into a chunk family if its content
/// spans more than one chunk.
///
/// A record whose content fits in one chunk is pushed unchanged.
/// Otherwise slice `n` (1-based) of the content becomes a copy of
/// the record with object ID `<id>-chunk-<n>`.
pub fn split_and_push_large_record(record: Record, out: &mut Vec<Record>, chunker: &Chunker) {
    if chunker.chunk_count(&record.content) <= 1 {
        out.push(record);
        return;
    }

    for (index, slice) in chunker.split(&record.content).into_iter().enumerate() {
        out.push(Record {
            object_id: format!("{}-chunk-{}", record.object_id, index + 1),
            content: slice.to_string(),
            ..record.clone()
        });
    }
}

/// Title precedence: document title, front matter title, first
/// heading, then empty.
fn resolve_title(document: &Document, main_heading: &str) -> String {
    [
        Some(document.title.as_str()),
        document.meta.title.as_deref(),
        Some(main_heading),
    ]
    .into_iter()
    .flatten()
    .find(|title| !title.is_empty())
    .unwrap_or_default()
    .to_string()
}

/// Path without its final `.ext` suffix.
pub fn strip_extension(path: &str) -> &str {
    match EXTENSION.find(path) {
        Some(ext) => &path[..ext.start()],
        None => path,
    }
}

/// Public URL of a page: its path with the extension swapped for `.html`.
pub fn page_url(path: &str) -> String {
    format!("{}.html", strip_extension(path))
}
