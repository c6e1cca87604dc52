//! Parallel document processing.
//!
//! A [`WorkerPool`] owns a fixed set of worker threads and a FIFO
//! task queue. A single coordinator task holds all mutable pool
//! state; the pool handle and the workers only talk to it through
//! channels.

pub mod pool;
pub mod processor;
pub mod protocol;

pub use pool::{pool_size, PoolStats, WorkerPool};
pub use processor::{process_document, DocumentProcessor, HtmlProcessor};
pub use protocol::WorkerMessage;
