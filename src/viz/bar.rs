//! Grouped bar chart: one cluster per row, one bar per column, and value labels
//! stacked above and below each cluster.

use anyhow::{Result, anyhow};
use log::{debug, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::figure::Figure;
use super::legend::{draw_legend_panel, estimate_right_legend_height_px};
use super::text::{format_label, format_tick};
use super::types::BarChartRequest;
use super::util::{bar_base_range, compute_left_label_area_px, map_locale, row_tick};
use crate::layout::{Annotation, Bar, BarGroupLabels, label_offset, layout_bar_groups};
use crate::style::{Rgba, series_colors};
use crate::viz_plotters_adapter::{fill_style, label_style};

/// Total width of one cluster in x units (rows are 1 apart).
const GROUP_WIDTH: f64 = 0.5;

/// Share of the canvas width given to the plot; the rest holds the legend.
const PLOT_WIDTH_PERCENT: u32 = 80;

#[derive(Debug, Clone)]
pub(crate) struct BarPlan {
    pub y_range: (f64, f64),
    pub offset: f64,
    pub colors: Vec<Rgba>,
    pub bars: Vec<Bar>,
    pub bar_width: f64,
    pub groups: Vec<BarGroupLabels>,
}

pub(crate) fn plan_bar_chart(req: &BarChartRequest<'_>) -> Result<BarPlan> {
    let table = req.chart.table;
    let cfg = &req.chart.config;
    let n_series = table.n_columns();

    if let Some(col) = table
        .columns()
        .iter()
        .find(|c| c.values.iter().any(|v| !v.is_finite()))
    {
        anyhow::bail!("bar chart values must be finite (column '{}')", col.name);
    }
    let (lo, hi) = table
        .value_range()
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;

    let colors = series_colors(n_series, req.chart.colors.as_deref());
    let bar_width = GROUP_WIDTH / n_series as f64;

    let mut bars = Vec::with_capacity(table.n_rows() * n_series);
    for row in 0..table.n_rows() {
        let left = row as f64 - GROUP_WIDTH / 2.0;
        for (j, (col, color)) in table.columns().iter().zip(&colors).enumerate() {
            bars.push(Bar::new(left + j as f64 * bar_width, col.values[row], *color));
        }
    }

    let (base_lo, base_hi) = bar_base_range(lo, hi);
    let offset = label_offset(base_lo, base_hi, cfg.bar_label_divisor);
    let headroom = offset * cfg.bar_headroom;
    let y_range = (lo - headroom, hi + headroom);

    let groups = layout_bar_groups(&bars, n_series, offset, cfg.bar_first_step_ratio)?;
    debug!(
        "bar chart: {} groups of {n_series}, y-range {:?}, label offset {offset:.4}",
        groups.len(),
        y_range
    );

    Ok(BarPlan {
        y_range,
        offset,
        colors,
        bars,
        bar_width,
        groups,
    })
}

pub(crate) fn draw_bar_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    req: &BarChartRequest<'_>,
    plan: &BarPlan,
    figure: &Figure,
) -> Result<()> {
    let table = req.chart.table;
    let font_px = figure.font_px();
    let (num_locale, dec_sep) = map_locale(&req.chart.config.locale);
    let (ymin, ymax) = plan.y_range;
    let n_rows = table.n_rows();

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (plot_area, legend_area) = root.split_horizontally(PLOT_WIDTH_PERCENT.percent_width());

    let y_label_count = 8usize;
    let left_label_px =
        compute_left_label_area_px(ymin, ymax, y_label_count, font_px, num_locale, dec_sep);
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(figure.pt_px(6.0).max(1) as u32)
        .caption(req.chart.title.as_str(), (FontFamily::SansSerif, font_px))
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, (font_px * 3.0) as u32)
        .build_cartesian_2d(-0.5f64..(n_rows as f64 - 0.5), ymin..ymax)
        .map_err(|e| anyhow!("{:?}", e))?;

    let index = table.index();
    let x_label_fmt = |x: &f64| row_tick(index, *x);
    let y_label_fmt = |v: &f64| format_tick(*v, num_locale, dec_sep);
    let grid = RGBColor(166, 166, 166).stroke_width(figure.pt_px(0.5).max(1) as u32);

    chart
        .configure_mesh()
        .y_desc(req.chart.ylabel.as_str())
        .x_labels(n_rows.max(2))
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .bold_line_style(grid)
        .light_line_style(WHITE.mix(0.0))
        .label_style((FontFamily::SansSerif, font_px))
        .axis_desc_style((FontFamily::SansSerif, font_px))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Bars grow from zero; clip them to the visible range.
    chart
        .draw_series(plan.bars.iter().map(|b| {
            let y0 = b.value.min(0.0).max(ymin);
            let y1 = b.value.max(0.0).min(ymax);
            Rectangle::new([(b.x, y0), (b.x + plan.bar_width, y1)], fill_style(&b.color))
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    let gap_px = figure.pt_px(2.0);
    let draw_label = |a: &Annotation, x: f64, dy: i32| -> Result<()> {
        let (x_px, y_px) = chart.backend_coord(&(x, a.position));
        let style = label_style(&a.color, font_px).pos(Pos::new(HPos::Center, VPos::Bottom));
        root.draw(&Text::new(
            format_label(a.value, num_locale, dec_sep),
            (x_px, y_px + dy),
            style,
        ))
        .map_err(|e| anyhow!("{:?}", e))
    };
    for group in &plan.groups {
        let center = group.x + GROUP_WIDTH / 2.0;
        for a in &group.negative {
            draw_label(a, center, gap_px)?;
        }
        for a in &group.positive {
            draw_label(a, center, -gap_px)?;
        }
    }

    let items: Vec<(String, Rgba)> = req
        .chart
        .legend_texts()
        .into_iter()
        .zip(plan.colors.iter().copied())
        .collect();
    let (_, plot_y) = chart.plotting_area().get_pixel_range();
    let (legend_w, legend_h) = legend_area.dim_in_pixel();
    let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
    let needed = estimate_right_legend_height_px(&labels, legend_w as i32, font_px);
    if plot_y.start + needed > legend_h as i32 {
        warn!("legend needs {needed}px but only {legend_h}px are available; entries will be cut off");
    }
    draw_legend_panel(&legend_area, &items, plot_y.start, font_px)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, Table};
    use crate::viz::types::ChartRequest;

    #[test]
    fn plan_groups_rows_and_keeps_signs() {
        let t = Table::new(
            vec!["1M".into(), "3M".into()],
            vec![
                Column::new("Fund", vec![10.0, 1.0]),
                Column::new("Index", vec![-4.0, 2.0]),
                Column::new("Peers", vec![6.0, -1.0]),
            ],
        )
        .unwrap();
        let req = BarChartRequest {
            chart: ChartRequest::new(&t, "Returns", "%", "", "r"),
        };
        let plan = plan_bar_chart(&req).unwrap();
        assert_eq!(plan.groups.len(), 2);
        assert_eq!(plan.bars.len(), 6);

        let g0 = &plan.groups[0];
        let pos: Vec<f64> = g0.positive.iter().map(|a| a.value).collect();
        let neg: Vec<f64> = g0.negative.iter().map(|a| a.value).collect();
        assert_eq!(pos, vec![10.0, 6.0]);
        assert_eq!(neg, vec![-4.0]);
        assert_eq!(g0.negative[0].position, -4.0 - plan.offset);
        assert_eq!(g0.positive[0].position, 10.0 + plan.offset / 2.0);

        // y-range leaves four offsets of headroom past the extremes
        assert!((plan.y_range.1 - (10.0 + 4.0 * plan.offset)).abs() < 1e-12);
        assert!((plan.y_range.0 - (-4.0 - 4.0 * plan.offset)).abs() < 1e-12);
    }

    #[test]
    fn nan_bar_is_rejected_before_layout() {
        let t = Table::new(
            vec!["a".into()],
            vec![Column::new("x", vec![f64::NAN])],
        )
        .unwrap();
        let req = BarChartRequest {
            chart: ChartRequest::new(&t, "", "", "", "r"),
        };
        assert!(plan_bar_chart(&req).is_err());
    }
}
