//! Indexer layer tests
//!
//! Section splitting and record building over whole documents, plus
//! UTF-8 safety of chunk families with multi-byte content.

mod test_multibyte;
mod test_splitter;
