//! Application state for the API server.

use janus_dispatcher::Dispatcher;
use janus_llm::ModelGateway;
use std::sync::Arc;

/// Shared application state for the API server.
pub struct AppState {
    /// The dispatcher driving the task lifecycle
    pub dispatcher: Arc<Dispatcher>,

    /// The model gateway serving the chat passthrough
    pub gateway: Arc<ModelGateway>,

    /// Server start time (for health checks)
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>, gateway: Arc<ModelGateway>) -> Self {
        Self {
            dispatcher,
            gateway,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
