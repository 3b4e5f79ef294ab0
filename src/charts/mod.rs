/// Chart layer: toolkit-independent chart specifications.
///
/// Each builder in [`builders`] takes a [`FilteredView`](crate::data::filter::FilteredView)
/// and returns a [`ChartSpec`]; `ui::plot` turns specs into egui_plot items.

pub mod builders;
pub mod stats;

use serde::Serialize;

pub use builders::{
    avg_price_by_make_bar, correlation_heatmap, make_count_bar, price_by_condition_box,
    year_histogram, year_price_scatter,
};

// ---------------------------------------------------------------------------
// ChartSpec – what to draw, not how
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub show_legend: bool,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Bar { bars: Vec<BarDatum> },
    Box { boxes: Vec<BoxGroup> },
    Histogram { bins: Vec<HistogramBin> },
    Scatter { color_by: String, series: Vec<ScatterSeries> },
    Heatmap { labels: Vec<String>, cells: Vec<Vec<Option<f64>>> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

/// Five-number summary of one group, plotly style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub label: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Furthest data points within 1.5 × IQR of the box.
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    /// Value of the colour column shared by every point.
    pub key: String,
    pub points: Vec<[f64; 2]>,
}

impl ChartSpec {
    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::Bar { bars } => bars.is_empty(),
            ChartKind::Box { boxes } => boxes.is_empty(),
            ChartKind::Histogram { bins } => bins.iter().all(|b| b.count == 0),
            ChartKind::Scatter { series, .. } => series.iter().all(|s| s.points.is_empty()),
            ChartKind::Heatmap { labels, .. } => labels.is_empty(),
        }
    }
}

/// The six dashboard charts, in layout order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub make_count: ChartSpec,
    pub avg_price_by_make: ChartSpec,
    pub price_by_condition: ChartSpec,
    pub year_histogram: ChartSpec,
    pub year_vs_price: ChartSpec,
    pub correlation: ChartSpec,
}
