//! Search provider tests
//!
//! Page submission, release to disk, uploads through the dry-run
//! uploader and the re-upload mode.

mod test_provider;
mod test_pipeline;
