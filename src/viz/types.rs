//! Public types for the visualization module.

use crate::config::ChartConfig;
use crate::models::Table;
use crate::style::Rgba;
use serde::{Deserialize, Serialize};

/// Chart kinds this crate renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotKind {
    /// Time-series lines with endpoint labels.
    Line,
    /// Grouped bars (one group per row) with stacked value labels.
    GroupedBar,
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Everything needed to render one chart.
///
/// The output lands at `<filepath><filename>.<ext>`: `filepath` is used as a
/// prefix, so directories need their trailing separator.
#[derive(Debug, Clone)]
pub struct ChartRequest<'a> {
    pub table: &'a Table,
    pub title: String,
    pub ylabel: String,
    pub filepath: String,
    pub filename: String,
    /// Explicit series colors, cycled when shorter than the column count.
    pub colors: Option<Vec<Rgba>>,
    /// Legend texts; defaults to the column names.
    pub legend_labels: Option<Vec<String>>,
    pub config: ChartConfig,
}

impl<'a> ChartRequest<'a> {
    pub fn new(
        table: &'a Table,
        title: impl Into<String>,
        ylabel: impl Into<String>,
        filepath: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            table,
            title: title.into(),
            ylabel: ylabel.into(),
            filepath: filepath.into(),
            filename: filename.into(),
            colors: None,
            legend_labels: None,
            config: ChartConfig::default(),
        }
    }

    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_legend_labels(mut self, labels: Vec<String>) -> Self {
        self.legend_labels = Some(labels);
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Legend texts, one per column; missing entries fall back to column names.
    pub fn legend_texts(&self) -> Vec<String> {
        let names = self.table.column_names();
        match &self.legend_labels {
            Some(labels) => names
                .into_iter()
                .enumerate()
                .map(|(i, n)| labels.get(i).cloned().unwrap_or(n))
                .collect(),
            None => names,
        }
    }
}

/// Line chart request: a [`ChartRequest`] plus the squeeze flag.
#[derive(Debug, Clone)]
pub struct LineChartRequest<'a> {
    pub chart: ChartRequest<'a>,
    /// Clamp the y-axis to the data's rounded min/max.
    pub squeeze: bool,
}

/// Grouped bar chart request.
#[derive(Debug, Clone)]
pub struct BarChartRequest<'a> {
    pub chart: ChartRequest<'a>,
}

/// Labels computed during a render, returned alongside the output path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub path: String,
    pub kind: PlotKind,
    pub y_range: (f64, f64),
    pub offset: f64,
    pub line_labels: Vec<crate::layout::Annotation>,
    pub bar_labels: Vec<crate::layout::BarGroupLabels>,
}
