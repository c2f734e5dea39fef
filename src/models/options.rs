use serde::Deserialize;
use utoipa::IntoParams;

// Dimension limits shared by every endpoint that accepts a viewport size.
pub const MIN_DIMENSION: u32 = 100;
pub const MAX_DIMENSION: u32 = 4000;
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 500;

const DEFAULT_TITLE: &str = "Google Chart";
const DEFAULT_BACKGROUND: &str = "white";

/// Which Google Charts visualization to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Pie,
    Bar,
    Line,
}

impl ChartType {
    /// Unrecognized and missing values fall back to pie. This is the
    /// documented behavior of the service, not an error case.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("bar") => ChartType::Bar,
            Some("line") => ChartType::Line,
            _ => ChartType::Pie,
        }
    }

    /// The `google.visualization` class that draws this chart type.
    pub fn visualization_class(&self) -> &'static str {
        match self {
            ChartType::Pie => "PieChart",
            ChartType::Bar => "ColumnChart",
            ChartType::Line => "LineChart",
        }
    }
}

/// Output encoding of the captured screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("jpeg") => ImageFormat::Jpeg,
            _ => ImageFormat::Png,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Raw query parameters accepted by the chart endpoints. Dimensions arrive
/// as strings so that non-numeric values fall back to defaults instead of
/// failing extraction.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ChartQuery {
    pub w: Option<String>,
    pub h: Option<String>,
    #[serde(rename = "type")]
    pub chart_type: Option<String>,
    pub title: Option<String>,
    pub format: Option<String>,
    pub background: Option<String>,
    pub data: Option<String>,
}

/// Validated, request-scoped display options.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub chart_type: ChartType,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub format: ImageFormat,
}

impl ChartOptions {
    pub fn from_query(query: &ChartQuery) -> Self {
        ChartOptions {
            chart_type: ChartType::from_param(query.chart_type.as_deref()),
            title: query
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            width: parse_dimension(query.w.as_deref(), DEFAULT_WIDTH),
            height: parse_dimension(query.h.as_deref(), DEFAULT_HEIGHT),
            background: query
                .background
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string()),
            format: ImageFormat::from_param(query.format.as_deref()),
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from_query(&ChartQuery::default())
    }
}

fn parse_dimension(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
        .clamp(MIN_DIMENSION, MAX_DIMENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_defaults_to_pie() {
        assert_eq!(ChartType::from_param(None), ChartType::Pie);
        assert_eq!(ChartType::from_param(Some("pie")), ChartType::Pie);
        assert_eq!(ChartType::from_param(Some("donut")), ChartType::Pie);
        assert_eq!(ChartType::from_param(Some("")), ChartType::Pie);
    }

    #[test]
    fn test_chart_type_known_variants() {
        assert_eq!(ChartType::from_param(Some("bar")), ChartType::Bar);
        assert_eq!(ChartType::from_param(Some("line")), ChartType::Line);
        assert_eq!(ChartType::Bar.visualization_class(), "ColumnChart");
        assert_eq!(ChartType::Line.visualization_class(), "LineChart");
        assert_eq!(ChartType::Pie.visualization_class(), "PieChart");
    }

    #[test]
    fn test_format_defaults_to_png() {
        assert_eq!(ImageFormat::from_param(None), ImageFormat::Png);
        assert_eq!(ImageFormat::from_param(Some("png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_param(Some("webp")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_param(Some("jpeg")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_param(Some("JPEG")), ImageFormat::Jpeg);
    }

    #[test]
    fn test_dimension_clamping() {
        assert_eq!(parse_dimension(Some("50"), DEFAULT_WIDTH), 100);
        assert_eq!(parse_dimension(Some("100"), DEFAULT_WIDTH), 100);
        assert_eq!(parse_dimension(Some("1200"), DEFAULT_WIDTH), 1200);
        assert_eq!(parse_dimension(Some("4000"), DEFAULT_WIDTH), 4000);
        assert_eq!(parse_dimension(Some("99999"), DEFAULT_WIDTH), 4000);
    }

    #[test]
    fn test_dimension_non_numeric_falls_back() {
        assert_eq!(parse_dimension(Some("wide"), DEFAULT_WIDTH), 800);
        assert_eq!(parse_dimension(Some("-20"), DEFAULT_HEIGHT), 500);
        assert_eq!(parse_dimension(Some("12.5"), DEFAULT_HEIGHT), 500);
        assert_eq!(parse_dimension(None, DEFAULT_HEIGHT), 500);
    }

    #[test]
    fn test_options_from_query_defaults() {
        let options = ChartOptions::from_query(&ChartQuery::default());
        assert_eq!(options.width, 800);
        assert_eq!(options.height, 500);
        assert_eq!(options.chart_type, ChartType::Pie);
        assert_eq!(options.format, ImageFormat::Png);
        assert_eq!(options.background, "white");
    }

    #[test]
    fn test_options_from_query_explicit() {
        let query = ChartQuery {
            w: Some("640".to_string()),
            h: Some("5000".to_string()),
            chart_type: Some("bar".to_string()),
            title: Some("Quarterly".to_string()),
            format: Some("jpeg".to_string()),
            background: Some("#f0f0f0".to_string()),
            data: None,
        };
        let options = ChartOptions::from_query(&query);
        assert_eq!(options.width, 640);
        assert_eq!(options.height, 4000);
        assert_eq!(options.chart_type, ChartType::Bar);
        assert_eq!(options.title, "Quarterly");
        assert_eq!(options.format, ImageFormat::Jpeg);
        assert_eq!(options.background, "#f0f0f0");
    }
}
