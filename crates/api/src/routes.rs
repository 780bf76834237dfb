//! HTTP route handlers for the API.

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use janus_common::JanusError;
use janus_llm::ProviderId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// API error envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<JanusError> for ApiError {
    fn from(err: JanusError) -> Self {
        let message = err.to_string();
        match err {
            JanusError::Classification(_) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "CLASSIFICATION_FAILED",
                message,
            ),
            JanusError::Assignment { .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "ASSIGNMENT_FAILED", message)
            }
            JanusError::TaskNotFound(_) => Self::new(StatusCode::NOT_FOUND, "TASK_NOT_FOUND", message),
            JanusError::Provider { .. } => Self::new(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", message),
            JanusError::Storage(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAULT", message)
            }
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub providers: usize,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        providers: state.gateway.providers().len(),
    })
}

/// Task intake request body.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub description: String,
}

/// Task intake response body.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task_id: String,
    pub category: String,
    pub status: String,
}

/// Classify, dispatch, and record a task.
pub async fn submit_task(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    info!(
        description_preview = %request.description.chars().take(50).collect::<String>(),
        "Received task"
    );

    let (task_id, label) = state.dispatcher.handle(&request.description).await.map_err(|e| {
        error!(error = %e, "Task handling failed");
        ApiError::from(e)
    })?;

    let status = state
        .dispatcher
        .task_status(&task_id)
        .await
        .map_err(ApiError::from)?
        .unwrap_or_default();

    Ok(Json(TaskResponse {
        task_id,
        category: label.to_string(),
        status: status.to_string(),
    }))
}

/// Task status response body.
#[derive(Debug, Serialize)]
pub struct TaskStatusResponse {
    pub task_id: String,
    pub status: String,
}

/// Look up a task's recorded status.
pub async fn task_status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskStatusResponse>, ApiError> {
    match state.dispatcher.task_status(&task_id).await.map_err(ApiError::from)? {
        Some(status) => Ok(Json(TaskStatusResponse {
            task_id,
            status: status.to_string(),
        })),
        None => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "TASK_NOT_FOUND",
            format!("task not found: {task_id}"),
        )),
    }
}

/// Chat passthrough request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

/// Chat passthrough response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub provider: String,
}

/// Forward a prompt to the named provider.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Path(provider_name): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let enabled = || {
        state
            .gateway
            .providers()
            .iter()
            .map(ProviderId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let provider = ProviderId::parse(&provider_name).ok_or_else(|| {
        ApiError::new(
            StatusCode::NOT_FOUND,
            "UNKNOWN_PROVIDER",
            format!("provider '{provider_name}' not found. Available providers: {}", enabled()),
        )
    })?;

    if !state.gateway.is_enabled(provider) {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "UNKNOWN_PROVIDER",
            format!("provider '{provider_name}' not configured. Available providers: {}", enabled()),
        ));
    }

    let response = state
        .gateway
        .complete(provider, &request.prompt)
        .await
        .map_err(|e| {
            error!(provider = %provider, error = %e, "Chat completion failed");
            ApiError::from(e)
        })?;

    info!(provider = %provider, "Chat completion served");
    Ok(Json(ChatResponse {
        response,
        provider: provider.to_string(),
    }))
}
