//! XML-backed record store for Janus.
//!
//! This crate persists every dispatched task's lifecycle state plus two
//! process-wide append-only logs (`Errors`, `Results`) in one XML document
//! that is read and rewritten in full on every mutation.
//!
//! # Consistency discipline
//!
//! - All mutations serialize through a single async mutex (single-writer).
//! - Writes are temp file + fsync + atomic rename: all-or-nothing per
//!   operation, prior state survives a failed write.
//! - Every operation initializes an empty well-formed document when the
//!   backing file is absent (self-healing; callers never create schema).

pub mod document;
pub mod store;

pub use document::{StoreDocument, TimestampedEntry};
pub use store::RecordStore;
