use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::options::ChartType;

/// A single cell in the dataset. Google Charts accepts strings and numbers
/// interchangeably, so the wire format stays untagged JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// The tabular dataset driving a chart. Row 0 is the header row; every
/// following row is one data row. Constructed once per request and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build the per-request table from the optional `data` query parameter.
    ///
    /// No parameter means the built-in default for the chart type. A
    /// parameter that does not parse as JSON rejects the request before any
    /// browser session is created. A parsed table without at least one data
    /// row besides the header also falls back to the default. Row shapes are
    /// not validated further; ragged rows pass through to the composer.
    pub fn normalize(data: Option<&str>, chart_type: ChartType) -> Result<Self, ApiError> {
        let Some(raw) = data else {
            return Ok(Self::default_for(chart_type));
        };

        let table: Table = serde_json::from_str(raw)
            .map_err(|e| ApiError::InvalidInput(format!("data parameter is not a table: {e}")))?;

        if table.has_data_rows() {
            Ok(table)
        } else {
            Ok(Self::default_for(chart_type))
        }
    }

    /// True when there is a header row plus at least one data row.
    pub fn has_data_rows(&self) -> bool {
        self.rows.len() >= 2
    }

    pub fn default_for(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Pie => Self::default_pie(),
            ChartType::Bar | ChartType::Line => Self::default_series(),
        }
    }

    /// Single-series default used by pie charts.
    pub fn default_pie() -> Self {
        Table {
            rows: vec![
                vec!["Defect".into(), "Qty".into()],
                vec!["Broken stitch / Run off stitch / Open seam".into(), 25.0.into()],
                vec!["Puckered seam / Pleated seam / Twisted seam".into(), 20.0.into()],
                vec!["Missed stitch / Missed bar-tuck".into(), 4.0.into()],
            ],
        }
    }

    /// Multi-series default used by column and line charts.
    pub fn default_series() -> Self {
        Table {
            rows: vec![
                vec!["Month".into(), "Sales".into(), "Expenses".into()],
                vec!["Jan".into(), 1000.0.into(), 400.0.into()],
                vec!["Feb".into(), 1170.0.into(), 460.0.into()],
                vec!["Mar".into(), 660.0.into(), 1120.0.into()],
                vec!["Apr".into(), 1030.0.into(), 540.0.into()],
            ],
        }
    }
}
