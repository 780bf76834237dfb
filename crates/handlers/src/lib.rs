//! Label-specific task handlers for Janus.
//!
//! One handler per label in the closed set:
//!
//! - [`CodingHandler`] — generates a minimal HTML page and smoke tests it.
//! - [`ResearchHandler`] — builds queries (with LLM enhancement and a
//!   fallback to the base queries), fetches results through the
//!   [`SearchProvider`] seam, and summarizes what came back.
//!
//! Handlers report their outcome as a [`HandlerVerdict`]
//! (success text or failure detail); an `Err` means the invocation itself
//! faulted and the dispatcher records no task for the attempt.
//!
//! [`HandlerVerdict`]: janus_common::HandlerVerdict

pub mod coding;
pub mod research;
pub mod search;

pub use coding::CodingHandler;
pub use research::ResearchHandler;
pub use search::{HttpSearchProvider, SearchHit, SearchProvider};
