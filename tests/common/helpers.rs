// Test helper functions

use crossbeam_channel::Receiver;
use docindex::core::config::Config;
use docindex::core::error::{DocIndexError, Result};
use docindex::core::services::Services;
use docindex::core::types::{Document, Record};
use docindex::core::worker::DocumentProcessor;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Config with uploads disabled and a small pool
#[allow(dead_code)] // Used in integration tests
pub fn offline_config() -> Config {
    let mut config = Config::default();
    config.workers.max_workers = 2;
    config.search_index.upload_during_build = false;
    config
}

/// Create test services with uploads disabled
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> Services {
    Services::new(offline_config())
}

/// Document with a bare HTML body
#[allow(dead_code)] // Used in integration tests
pub fn document(path: &str, lang: &str) -> Document {
    Document::new(path, lang, format!("<h1>{path}</h1><p>Body of {path}</p>"))
}

/// Minimal record for a document
#[allow(dead_code)] // Used in integration tests
pub fn record(object_id: &str, lang: &str) -> Record {
    Record {
        object_id: object_id.to_string(),
        title: String::new(),
        content: format!("content of {object_id}"),
        headings: vec![],
        keywords: vec![],
        anchor: None,
        url: format!("{object_id}.html"),
        lang: lang.to_string(),
        section: None,
    }
}

/// Counts calls and returns one record per document
#[allow(dead_code)] // Used in integration tests
#[derive(Default)]
pub struct CountingProcessor {
    pub calls: AtomicUsize,
}

impl CountingProcessor {
    #[allow(dead_code)] // Used in integration tests
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentProcessor for CountingProcessor {
    fn process(&self, document: &Document) -> Result<Vec<Record>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![record(&document.path, &document.lang)])
    }
}

/// Panics on one path, succeeds on all others
#[allow(dead_code)] // Used in integration tests
pub struct PanickingProcessor {
    pub panic_on: String,
}

impl DocumentProcessor for PanickingProcessor {
    fn process(&self, document: &Document) -> Result<Vec<Record>> {
        if document.path == self.panic_on {
            panic!("worker crashed on {}", document.path);
        }
        Ok(vec![record(&document.path, &document.lang)])
    }
}

/// Fails on one path, succeeds on all others
#[allow(dead_code)] // Used in integration tests
pub struct FailingProcessor {
    pub fail_on: String,
}

impl DocumentProcessor for FailingProcessor {
    fn process(&self, document: &Document) -> Result<Vec<Record>> {
        if document.path == self.fail_on {
            return Err(DocIndexError::ProcessingFailed(format!(
                "cannot parse {}",
                document.path
            )));
        }
        Ok(vec![record(&document.path, &document.lang)])
    }
}

/// Blocks every task until a token arrives on `release`
#[allow(dead_code)] // Used in integration tests
pub struct GateProcessor {
    pub release: Receiver<()>,
}

impl DocumentProcessor for GateProcessor {
    fn process(&self, document: &Document) -> Result<Vec<Record>> {
        let _ = self.release.recv();
        Ok(vec![record(&document.path, &document.lang)])
    }
}
