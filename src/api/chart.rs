use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};

use crate::error::ApiError;
use crate::models::options::ChartQuery;
use crate::models::{ChartOptions, ImageFormat, Table};
use crate::server::AppState;
use crate::services::compose_document;

/// Serve the chart as an HTML preview page
///
/// The preview embeds the same render document the image pipeline loads
/// into the browser, so what a human sees in their own browser is what the
/// screenshot will capture. Passing `format` switches to the image
/// response.
#[utoipa::path(
    get,
    path = "/chart",
    params(ChartQuery),
    responses(
        (status = 200, description = "Chart preview page", content_type = "text/html"),
        (status = 400, description = "data parameter present but not parseable"),
    ),
    tag = "Chart"
)]
pub async fn handle_chart_page(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ApiError> {
    let options = ChartOptions::from_query(&query);
    let table = Table::normalize(query.data.as_deref(), options.chart_type)?;

    if query.format.is_some() {
        return render_image(&state, &table, &options).await;
    }

    Ok(Html(compose_document(&table, &options)).into_response())
}

/// Render the chart to an image
///
/// Drives a headless browser through one render session: load the composed
/// document, wait for the completion marker, screenshot the viewport.
#[utoipa::path(
    get,
    path = "/chart.png",
    params(ChartQuery),
    responses(
        (status = 200, description = "Rendered chart image", content_type = "image/png"),
        (status = 400, description = "data parameter present but not parseable"),
        (status = 500, description = "Browser launch, navigation or render-timeout failure"),
    ),
    tag = "Chart"
)]
pub async fn handle_chart_image(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ApiError> {
    let options = ChartOptions::from_query(&query);

    // Input validation happens before any browser session exists; a bad
    // data parameter must never cost a Chrome launch.
    let table = Table::normalize(query.data.as_deref(), options.chart_type)?;

    render_image(&state, &table, &options).await
}

async fn render_image(
    state: &AppState,
    table: &Table,
    options: &ChartOptions,
) -> Result<Response, ApiError> {
    let bytes = state.renderer.render(table, options).await?;
    Ok(image_response(options.format, bytes))
}

/// Wrap an encoded image in the response the caller receives.
///
/// Every render is request-specific; intermediaries must not serve a stale
/// chart, hence `no-store`.
fn image_response(format: ImageFormat, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.content_type()),
            (header::CACHE_CONTROL, "no-store"),
        ],
        bytes,
    )
        .into_response()
}
