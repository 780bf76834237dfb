//! Classifier and handler trait seams.
//!
//! These traits live in `janus-common` so that the dispatcher can depend on
//! the seams without depending on the crates that implement them (and so
//! tests can substitute deterministic implementations).

use crate::{Label, Result};
use async_trait::async_trait;

/// Maps free-text input to a [`Label`].
///
/// Implementations must be total over arbitrary text: any input either
/// classifies to exactly one label or fails with
/// [`JanusError::Classification`](crate::JanusError::Classification) —
/// never a panic, never a third value. Long input must be truncated
/// internally, not rejected.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Label>;
}

/// The outcome a handler reports for one task execution.
///
/// `output` is the produced artifact (generated page, research summary);
/// `note` is the success-or-failure text destined for the task log. A
/// handler that ran to completion returns a verdict even when the work
/// itself failed its checks — an `Err` from [`TaskHandler::execute`] means
/// the invocation faulted, which the dispatcher treats differently (no
/// record is written).
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerVerdict {
    pub output: String,
    pub note: String,
}

impl HandlerVerdict {
    pub fn new(output: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            note: note.into(),
        }
    }
}

/// A label-specific task executor.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// The label this handler serves.
    fn label(&self) -> Label;

    /// Execute the task described by `description` and report a verdict.
    async fn execute(&self, description: &str) -> Result<HandlerVerdict>;
}
