use axum::{extract::State, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::server::AppState;
use crate::services::session::resolve_executable;

/// Runtime diagnostics for deployment debugging.
#[derive(Debug, Serialize, ToSchema)]
pub struct DiagResponse {
    /// Operating system the service runs on
    pub platform: &'static str,
    /// CPU architecture
    pub arch: &'static str,
    /// Browser binary the next render session would launch
    pub executable_path: Option<String>,
    /// Resolution failure, when no binary could be found
    pub resolve_error: Option<String>,
    /// Whether the binary comes from the CHROME_PATH override
    pub env_override: bool,
    /// Whether sessions launch with the Chromium sandbox disabled
    pub sandbox_disabled: bool,
}

/// Report platform and browser-resolution state
///
/// Never fails: a missing browser binary is reported in the body so the
/// endpoint stays usable for debugging exactly that situation.
#[utoipa::path(
    get,
    path = "/diag",
    responses(
        (status = 200, description = "Diagnostics", body = DiagResponse),
    ),
    tag = "Diagnostics"
)]
pub async fn handle_diag(State(state): State<AppState>) -> Json<DiagResponse> {
    let config = state.renderer.config();

    let (executable_path, resolve_error) = match resolve_executable(config) {
        Ok(path) => (Some(path.display().to_string()), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Json(DiagResponse {
        platform: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        executable_path,
        resolve_error,
        env_override: config.has_env_override(),
        sandbox_disabled: config.disable_sandbox,
    })
}
