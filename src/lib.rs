//! portfolio_charts
//!
//! Render portfolio time-series line charts and grouped bar charts with value
//! labels that never overlap. Pairs with the `pfchart` CLI.
//!
//! ### Features
//! - Line charts labelled at each series' last value, labels pushed apart just
//!   enough to stay readable
//! - Grouped bar charts with gains labelled above and losses below each cluster
//! - Optional "squeeze" y-axis clamped to the data's rounded extremes
//! - PNG (300 DPI report size by default) or SVG output
//! - CSV input, JSON/CSV export of the computed labels
//!
//! ### Example
//! ```no_run
//! use portfolio_charts::data::load_csv;
//! use portfolio_charts::viz::{ChartRequest, LineChartRequest, render_line_chart};
//!
//! let table = load_csv("returns.csv")?;
//! let req = LineChartRequest {
//!     chart: ChartRequest::new(&table, "Growth of $10,000", "USD", "out/", "growth"),
//!     squeeze: true,
//! };
//! let path = render_line_chart(&req)?;
//! println!("wrote {path}");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod models;
pub mod style;
pub mod viz;
pub mod viz_plotters_adapter;

pub use config::ChartConfig;
pub use error::{DataError, LayoutError};
pub use layout::{Annotation, Bar, BarGroupLabels, Rounding};
pub use models::{Column, Table};
pub use style::Rgba;
