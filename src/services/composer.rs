//! Render-document composition.
//!
//! Builds the self-contained HTML document that the browser session loads.
//! The document embeds the dataset and display options as JSON literals,
//! pulls the Google Charts loader from its fixed URL, and sets the
//! completion marker from the library's own `ready` event. That marker is
//! the only hand-off between the library's internal render timing and the
//! completion detector.

use serde::Serialize;
use serde_json::json;

use crate::models::{ChartOptions, ChartType, Table};

/// Fixed, trusted location of the chart runtime loader.
pub const CHART_LOADER_URL: &str = "https://www.gstatic.com/charts/loader.js";

/// Attribute set on `<body>` once the chart has finished drawing.
pub const MARKER_ATTRIBUTE: &str = "data-rendered";

/// Produce the render document for one request.
pub fn compose_document(table: &Table, options: &ChartOptions) -> String {
    let data_json = inert_json(table);
    let options_json = inert_json(&chart_options_json(options));
    let background = sanitize_css_value(&options.background);

    format!(
        r#"<!doctype html><html><head>
  <meta charset="utf-8"/>
  <script src="{loader}"></script>
  <style>
    html,body{{margin:0;padding:20px;font-family:Arial,Helvetica,sans-serif;background:{background}}}
    #chart-wrap{{display:flex;justify-content:center}}
    #chart{{width:{width}px;height:{height}px}}
  </style>
</head><body>
  <div id="chart-wrap"><div id="chart"></div></div>
  <script>
    const chartData = {data_json};
    const chartOptions = {options_json};
    google.charts.load('current',{{packages:['corechart']}});
    google.charts.setOnLoadCallback(()=>{{
      const data  = google.visualization.arrayToDataTable(chartData);
      const chart = new google.visualization.{class_name}(document.getElementById('chart'));
      google.visualization.events.addListener(chart,'ready',()=>document.body.setAttribute('{marker}','1'));
      chart.draw(data, chartOptions);
    }});
  </script>
</body></html>"#,
        loader = CHART_LOADER_URL,
        background = background,
        width = options.width,
        height = options.height,
        data_json = data_json,
        options_json = options_json,
        class_name = options.chart_type.visualization_class(),
        marker = MARKER_ATTRIBUTE,
    )
}

/// Serialize a value for embedding inside the script element.
///
/// "</" anywhere in a cell or title would terminate the script element
/// early; "<\/" is the equivalent JSON escape and parses back to the same
/// string, so both literals stay inert data.
fn inert_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .expect("json serialization is infallible")
        .replace("</", "<\\/")
}

/// The options literal handed to `chart.draw`.
fn chart_options_json(options: &ChartOptions) -> serde_json::Value {
    let mut opts = json!({
        "title": options.title,
        "chartArea": {"left": 10, "top": 30, "width": "95%", "height": "85%"},
    });

    if options.chart_type == ChartType::Pie {
        opts["is3D"] = json!(true);
        opts["slices"] = json!({
            "0": {"color": "#f1c40f"},
            "1": {"color": "#2ecc71"},
            "2": {"color": "#0b2a58"},
        });
    }

    opts
}

/// Strip characters that could break out of a CSS declaration context.
///
/// This keeps the style block structurally valid for odd inputs; it is not
/// a security boundary, the background value comes from a trusted caller.
fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '(' | ')' | '"' | '\''))
        .collect()
}
