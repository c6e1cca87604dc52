//! Messages exchanged between the coordinator and its workers.
//!
//! The JSON form is `{"type": "...", "data": {...}}`, matching the
//! message shape used by the documentation build's worker scripts.

use serde::{Deserialize, Serialize};

use crate::core::error::DocIndexError;
use crate::core::types::{Document, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum WorkerMessage {
    /// Coordinator to worker: process one document
    Process(Document),

    /// Worker to coordinator: records of the last document
    Result { records: Vec<Record> },

    /// Worker to coordinator: the last document failed
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },

    /// Coordinator to worker: stop after the current message
    Terminate,
}

impl WorkerMessage {
    pub fn error(err: &DocIndexError) -> Self {
        WorkerMessage::Error {
            message: err.to_string(),
            stack: None,
        }
    }

    /// Message tag as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            WorkerMessage::Process(_) => "process",
            WorkerMessage::Result { .. } => "result",
            WorkerMessage::Error { .. } => "error",
            WorkerMessage::Terminate => "terminate",
        }
    }
}
