//! System-level domain events.

use serde::{Deserialize, Serialize};

/// Worker lifecycle and operational events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SystemEvent {
    /// A worker run started.
    WorkerStarted {
        /// Worker name.
        worker: String,
    },
    /// A worker run finished (completed or canceled).
    WorkerCompleted {
        /// Worker name.
        worker: String,
        /// Whether the run stopped early on a cancellation request.
        canceled: bool,
    },
    /// A worker run could not start or aborted with an error.
    WorkerFailed {
        /// Worker name.
        worker: String,
        /// Error message.
        message: String,
    },
}
