//! Worker pool tests
//!
//! Dispatch, completion barrier, result merging and failure handling
//! of the pool coordinator.
