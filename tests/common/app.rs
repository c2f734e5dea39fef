//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::time::Duration;
use tower::ServiceExt;

use chartshot::models::RenderConfig;
use chartshot::server::{build_router, create_app_state};

/// Test application driving the router in-process.
pub struct TestApp {
    router: axum::Router,
}

impl TestApp {
    /// Create a test application.
    ///
    /// The browser executable points at a path that cannot exist so any
    /// request that reaches session acquisition fails fast and
    /// deterministically, independent of whether the host has Chrome.
    pub fn new() -> Self {
        let config = RenderConfig {
            executable_path: Some(PathBuf::from("/nonexistent/chartshot-test-chrome")),
            navigation_timeout: Duration::from_millis(100),
            marker_timeout: Duration::from_millis(200),
            ..RenderConfig::default()
        };

        let state = create_app_state(config);
        let router = build_router(state);

        Self { router }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::get(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
