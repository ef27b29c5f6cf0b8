//! Visualization: render portfolio charts to **PNG** or **SVG**.
//!
//! - Line charts with value labels at each series' last point, kept apart so
//!   they never overlap
//! - Grouped bar charts with labels stacked above (gains) and below (losses)
//!   each cluster, legend in a separate right-hand panel
//! - Optional "squeeze" y-axis for line charts, clamped to rounded data extremes
//! - Locale-aware tick and label formatting (`1,234.5` vs `1.234,5`)
//!
//! Every call builds its own [`figure::Figure`] and drawing areas; nothing is
//! carried over between calls.

pub mod bar;
pub mod export;
pub mod figure;
pub mod legend;
pub mod line;
pub mod text;
pub mod types;
pub mod util;

pub use export::output_path;
pub use figure::Figure;
pub use types::{
    BarChartRequest, ChartRequest, ImageFormat, LineChartRequest, PlotKind,
    RenderedChart,
};

use anyhow::Result;
use log::info;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use bar::{draw_bar_chart, plan_bar_chart};
use export::{ensure_fonts_registered, present};
use line::{draw_line_chart, plan_line_chart};

/// Render a line chart and return the path of the written image.
pub fn render_line_chart(req: &LineChartRequest<'_>) -> Result<String> {
    Ok(render_line_chart_detailed(req)?.path)
}

/// Same as [`render_line_chart`] but also returns the computed labels and axis range.
pub fn render_line_chart_detailed(req: &LineChartRequest<'_>) -> Result<RenderedChart> {
    let cfg = &req.chart.config;
    cfg.validate()?;
    ensure_fonts_registered();

    let figure = Figure::from_config(cfg);
    let plan = plan_line_chart(req)?;
    let path = output_path(&req.chart.filepath, &req.chart.filename, cfg.format);

    match cfg.format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path.as_str(), figure.pixel_size()).into_drawing_area();
            draw_line_chart(&root, req, &plan, &figure)?;
            present(&root)?;
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path.as_str(), figure.pixel_size()).into_drawing_area();
            draw_line_chart(&root, req, &plan, &figure)?;
            present(&root)?;
        }
    }
    info!("wrote line chart to {path}");

    Ok(RenderedChart {
        path,
        kind: PlotKind::Line,
        y_range: plan.y_range,
        offset: plan.offset,
        line_labels: plan.labels,
        bar_labels: Vec::new(),
    })
}

/// Render a grouped bar chart and return the path of the written image.
pub fn render_bar_chart(req: &BarChartRequest<'_>) -> Result<String> {
    Ok(render_bar_chart_detailed(req)?.path)
}

/// Same as [`render_bar_chart`] but also returns the computed labels and axis range.
pub fn render_bar_chart_detailed(req: &BarChartRequest<'_>) -> Result<RenderedChart> {
    let cfg = &req.chart.config;
    cfg.validate()?;
    ensure_fonts_registered();

    let figure = Figure::from_config(cfg);
    // Grouping errors surface here, before anything is drawn.
    let plan = plan_bar_chart(req)?;
    let path = output_path(&req.chart.filepath, &req.chart.filename, cfg.format);

    match cfg.format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path.as_str(), figure.pixel_size()).into_drawing_area();
            draw_bar_chart(&root, req, &plan, &figure)?;
            present(&root)?;
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path.as_str(), figure.pixel_size()).into_drawing_area();
            draw_bar_chart(&root, req, &plan, &figure)?;
            present(&root)?;
        }
    }
    info!("wrote bar chart to {path}");

    Ok(RenderedChart {
        path,
        kind: PlotKind::GroupedBar,
        y_range: plan.y_range,
        offset: plan.offset,
        line_labels: Vec::new(),
        bar_labels: plan.groups,
    })
}
