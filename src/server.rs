//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::RenderConfig;
use crate::services::ChartRenderer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<ChartRenderer>,
}

/// Create application state from a render configuration.
pub fn create_app_state(config: RenderConfig) -> AppState {
    AppState {
        renderer: Arc::new(ChartRenderer::new(config)),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Chart endpoints
        .route("/", get(api::handle_chart_page))
        .route("/chart", get(api::handle_chart_page))
        .route("/chart.png", get(api::handle_chart_image))
        // Diagnostics
        .route("/diag", get(api::handle_diag))
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
