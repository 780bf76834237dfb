//! Task lifecycle orchestration for Janus.
//!
//! The dispatcher is the core of the service:
//!
//! 1. Receives a free-text task description
//! 2. Classifies it onto the closed label set {coding, research}
//! 3. Issues a fresh task id and runs the matching handler
//! 4. Records the outcome in the record store
//! 5. Answers status lookups from the same store
//!
//! ```text
//! description
//!      │
//!      ▼
//! ┌────────────┐   label   ┌──────────────────┐
//! │ Classifier ├──────────►│    Dispatcher    │
//! └────────────┘           └───┬──────────┬───┘
//!                              │          │
//!                     ┌────────▼───┐  ┌───▼────────┐
//!                     │   Coding   │  │  Research  │
//!                     │  handler   │  │  handler   │
//!                     └────────┬───┘  └───┬────────┘
//!                              │ verdict  │
//!                          ┌───▼──────────▼───┐
//!                          │   Record store   │
//!                          └──────────────────┘
//! ```

pub mod config;
pub mod dispatcher;

pub use config::ServiceConfig;
pub use dispatcher::Dispatcher;
