use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A rendered chart: the plotly.js `data` and `layout` objects.
///
/// The browser hands both fields straight to `Plotly.react`, so the
/// server never needs to know more about a figure than this.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct Figure {
    /// Plotly traces
    #[schema(value_type = Object)]
    pub data: Vec<Value>,
    /// Plotly layout
    #[schema(value_type = Object)]
    pub layout: Value,
}

impl Figure {
    pub fn new(data: Vec<Value>, layout: Value) -> Self {
        Self { data, layout }
    }

    /// Number of traces in the figure.
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// True when the figure carries no trace data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Names of the traces, in drawing order. Unnamed traces are skipped.
    pub fn trace_names(&self) -> Vec<&str> {
        self.data
            .iter()
            .filter_map(|trace| trace.get("name").and_then(Value::as_str))
            .collect()
    }

    /// The layout title text, if any.
    pub fn title(&self) -> Option<&str> {
        let title = self.layout.get("title")?;
        title
            .get("text")
            .and_then(Value::as_str)
            .or_else(|| title.as_str())
    }
}

/// One slider position and the month it stands for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthEntry {
    /// Slider position
    pub position: usize,
    /// First day of the month
    pub month: NaiveDate,
    /// Tick label, present only for labelled positions
    pub label: Option<String>,
}

/// The month index as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthIndexDto {
    pub months: Vec<MonthEntry>,
}

/// Box-and-whisker summary of one state at one month. The statistics are
/// absent when the state has no rows at that month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegionSummary {
    pub region: String,
    /// Number of points
    pub count: usize,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Summaries behind the box plot at one slider position.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BoxPlotStats {
    pub position: usize,
    pub month: NaiveDate,
    pub regions: Vec<RegionSummary>,
}
