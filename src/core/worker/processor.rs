//! The processing task run inside each worker.

use crate::core::error::Result;
use crate::core::indexer::{split_into_sections, RecordBuilder, RecordLimits};
use crate::core::types::{Document, Record};
use crate::core::worker::protocol::WorkerMessage;

/// Turns one document into search records
///
/// Implementations run on worker threads and must not share
/// mutable state between calls.
pub trait DocumentProcessor: Send + Sync + 'static {
    fn process(&self, document: &Document) -> Result<Vec<Record>>;
}

/// Section Splitter followed by Record Builder
#[derive(Debug, Clone, Default)]
pub struct HtmlProcessor {
    builder: RecordBuilder,
}

impl HtmlProcessor {
    pub fn new(limits: RecordLimits) -> Self {
        Self {
            builder: RecordBuilder::new(limits),
        }
    }
}

impl DocumentProcessor for HtmlProcessor {
    fn process(&self, document: &Document) -> Result<Vec<Record>> {
        let split = split_into_sections(&document.html);
        self.builder.build(document, &split)
    }
}

/// Run one task and produce the reply for the coordinator.
///
/// Pages marked `noIndex` yield an empty result without reaching the
/// processor.
pub fn process_document(processor: &dyn DocumentProcessor, document: &Document) -> WorkerMessage {
    if document.meta.no_index {
        tracing::debug!("Skipping noIndex page {}", document.path);
        return WorkerMessage::Result {
            records: Vec::new(),
        };
    }

    match processor.process(document) {
        Ok(records) => {
            tracing::debug!("Processed {} ({} records)", document.path, records.len());
            WorkerMessage::Result { records }
        }
        Err(e) => WorkerMessage::error(&e),
    }
}
