//! HTTP gateway for the Janus task routing service.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/v1/tasks` - Classify, dispatch, and record a task
//! - `GET /api/v1/tasks/{id}/status` - Look up a task's recorded status
//! - `POST /api/v1/chat/{provider}` - Chat passthrough to a model provider
//!
//! # Architecture
//!
//! ```text
//! Client
//!    │
//!    ▼
//! ┌─────────────────┐
//! │   API Gateway   │ ◄── This crate
//! │     (Axum)      │
//! └────────┬────────┘
//!          │
//!          ├────────────────────┐
//!          ▼                    ▼
//! ┌─────────────────┐  ┌─────────────────┐
//! │   Dispatcher    │  │  Model Gateway  │
//! │ (classify/run/  │  │ (openai/anthro- │
//! │    record)      │  │  pic/deepseek)  │
//! └─────────────────┘  └─────────────────┘
//! ```

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::AppState;

/// Create the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/tasks", post(routes::submit_task))
        .route("/api/v1/tasks/{id}/status", get(routes::task_status))
        .route("/api/v1/chat/{provider}", post(routes::chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the API server on the given address.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(state);

    info!(%addr, "Starting Janus API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
