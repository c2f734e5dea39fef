//! HTTP-surface integration tests.
//!
//! These exercise routing, validation and error mapping through the real
//! router. The test app points the browser executable at a nonexistent
//! path, so nothing here needs (or accidentally launches) a real Chrome.

mod common;

use axum::http::StatusCode;
use common::app::TestApp;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_health_returns_ok() {
    let app = TestApp::new();
    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_diag_reports_runtime_and_browser_state() {
    let app = TestApp::new();
    let response = app.get("/diag").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: serde_json::Value = response.json();

    assert_eq!(json["platform"], std::env::consts::OS);
    assert_eq!(json["arch"], std::env::consts::ARCH);
    assert_eq!(json["sandbox_disabled"], true);
    // The test config sets an explicit path, which counts as an override.
    assert_eq!(json["env_override"], true);
    assert_eq!(
        json["executable_path"],
        "/nonexistent/chartshot-test-chrome"
    );
}

#[tokio::test]
async fn test_chart_page_serves_default_pie_document() {
    let app = TestApp::new();
    let response = app.get("/chart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .header("content-type")
        .unwrap()
        .starts_with("text/html"));

    let body = response.text();
    assert!(body.contains("https://www.gstatic.com/charts/loader.js"));
    assert!(body.contains("new google.visualization.PieChart"));
    assert!(body.contains("data-rendered"));
    // Default pie dataset
    assert!(body.contains("Broken stitch / Run off stitch / Open seam"));
}

#[tokio::test]
async fn test_root_serves_the_same_preview() {
    let app = TestApp::new();
    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("google.charts.load"));
}

#[tokio::test]
async fn test_chart_page_embeds_provided_data() {
    let app = TestApp::new();
    let data = r#"[["City","Population"],["Zurich",420000]]"#;
    let response = app
        .get(&format!(
            "/chart?data={}",
            urlencode(data)
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.text();
    assert!(body.contains(r#"[["City","Population"],["Zurich",420000.0]]"#));
}

#[tokio::test]
async fn test_chart_page_type_selects_visualization_class() {
    let app = TestApp::new();

    let body = app.get("/chart?type=bar").await.text();
    assert!(body.contains("new google.visualization.ColumnChart"));
    // Bar charts get the multi-series default dataset.
    assert!(body.contains("Expenses"));

    let body = app.get("/chart?type=line").await.text();
    assert!(body.contains("new google.visualization.LineChart"));

    let body = app.get("/chart?type=histogram").await.text();
    assert!(body.contains("new google.visualization.PieChart"));
}

#[tokio::test]
async fn test_bad_data_rejected_on_image_endpoint() {
    let app = TestApp::new();
    let response = app.get("/chart.png?data=not-a-table").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("Invalid input"));
}

#[tokio::test]
async fn test_bad_data_rejected_on_preview_endpoint() {
    let app = TestApp::new();
    let response = app.get(&format!("/chart?data={}", urlencode("{broken"))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_render_failure_maps_to_server_error() {
    // With the nonexistent browser binary, a valid image request gets
    // through validation and fails at session acquisition.
    let app = TestApp::new();
    let response = app.get("/chart.png").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], 500);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Browser launch failed"));
}

#[tokio::test]
async fn test_format_param_switches_preview_route_to_image_path() {
    // `format` on /chart selects the image response; with the test
    // browser config that path fails at launch, proving it was taken.
    let app = TestApp::new();
    let response = app.get("/chart?format=png").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("Browser launch failed"));
}

/// Percent-encode a query value the way a browser would.
fn urlencode(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, percent_encoding::NON_ALPHANUMERIC).to_string()
}
