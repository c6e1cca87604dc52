//! Storage layer for generated search records.
//!
//! # Layout
//!
//! ```text
//! {output}/{search_dir}/
//! ├── en-algolia.json     # JSON array of English records
//! └── ru-algolia.json
//! ```

mod records;

pub use records::{load_records, RecordStore, RECORDS_FILE_SUFFIX};
