//! Common types and traits shared across Janus crates.
//!
//! This crate provides the foundational abstractions the dispatcher,
//! store, classifier, and handlers use to communicate: the error
//! taxonomy, the task/label/status types, the trait seams, and the
//! config env-substitution helper.

pub mod env;
pub mod error;
pub mod task;
pub mod traits;

pub use env::{expand_env_vars, expand_with};
pub use error::{JanusError, Result};
pub use task::{Label, TaskRecord, TaskStatus, fresh_task_id};
pub use traits::{HandlerVerdict, TaskHandler, TextClassifier};
