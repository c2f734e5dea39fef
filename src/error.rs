use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

/// Failures inside the render path. All of these are caught at the request
/// boundary; none of them crash the process, and the render session is
/// released before they propagate.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Render timed out after {waited_ms}ms waiting for completion marker")]
    Timeout { waited_ms: u64 },

    #[error("Marker evaluation failed: {0}")]
    Evaluation(String),

    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    #[error("Render task failed: {0}")]
    Task(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
