//! Charts
//!
//! A chart surface hosts at most one chart at a time. Charts are never
//! updated in place: the owner destroys the old one and creates a new one.

mod text;

pub use text::TextChartSurface;

use std::fmt;

use crate::metrics::Series;

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => f.write_str("bar"),
            ChartKind::Line => f.write_str("line"),
        }
    }
}

/// Everything needed to draw one single-series chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub series_name: String,
    /// Value axis starts at zero
    pub begin_at_zero: bool,
    pub show_legend: bool,
}

impl ChartSpec {
    pub fn new(
        kind: ChartKind,
        labels: Vec<String>,
        values: Vec<f64>,
        series_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            labels,
            values,
            series_name: series_name.into(),
            begin_at_zero: true,
            show_legend: true,
        }
    }

    pub fn from_series(kind: ChartKind, series: Series, series_name: impl Into<String>) -> Self {
        Self::new(kind, series.labels, series.values, series_name)
    }
}

/// Handle of a chart created on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(pub u64);

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}

/// Rendering target for charts
pub trait ChartSurface {
    /// Draw a new chart and return its handle
    fn create(&mut self, spec: &ChartSpec) -> ChartId;

    /// Tear down a chart. Unknown handles are ignored.
    fn destroy(&mut self, id: ChartId);
}
