//! Error types for Janus.
//!
//! One variant per failure kind in the service taxonomy, so callers can
//! distinguish a handled business outcome (task not found, provider down)
//! from a system fault without string-matching messages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JanusError {
    /// The classifier could not produce a label. Recoverable: logged, no
    /// task record is created.
    #[error("classification failed: {0}")]
    Classification(String),

    /// A handler invocation faulted (threw, not "reported failure").
    /// Keyed by the task id that was issued for the attempt.
    #[error("assignment failed for task {task_id}: {reason}")]
    Assignment { task_id: String, reason: String },

    /// A log or status operation targeted a task id that is not in the
    /// store.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// An external model provider call failed. Carries the provider name
    /// and the underlying cause; raw transport errors never escape the
    /// gateway.
    #[error("provider {provider} call failed: {cause}")]
    Provider { provider: String, cause: String },

    /// The record store's backing medium is unreadable or unwritable.
    /// Fatal to the operation in progress; prior state is preserved.
    #[error("storage fault: {0}")]
    Storage(String),

    /// A handler failed internally in a way that is not a verdict.
    #[error("handler error: {0}")]
    Handler(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JanusError>;
