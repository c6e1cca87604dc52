//! Document indexing module.
//!
//! Turns rendered HTML pages into bounded-size search records:
//!
//! - Section splitting at top-level heading boundaries
//! - Record building with a serialized-size ceiling per record
//! - UTF-8 safe character-based chunking of oversized records
//! - Page loading and file system walking for whole output trees
//! - Pipeline orchestration over the worker pool
//!
//! # Safety
//!
//! The chunker slices on `char_indices()` boundaries, so record
//! content containing emojis or other multi-byte sequences is never
//! split inside a character.

pub mod builder;
pub mod chunker;
pub mod html;
pub mod page;
pub mod pipeline;
pub mod splitter;
pub mod walker;

pub use builder::{RecordBuilder, RecordLimits};
pub use chunker::Chunker;
pub use page::{load_page, Page, PageInfo};
pub use pipeline::IndexingPipeline;
pub use splitter::{split_into_sections, SplitDocument};
pub use walker::FileWalker;
