//! Line chart: one line per column, a zero reference line, and value labels
//! stacked at the right edge of the plot.

use anyhow::{Result, anyhow};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::figure::Figure;
use super::text::{estimate_text_width_px, format_label, format_tick};
use super::types::LineChartRequest;
use super::util::{
    compute_left_label_area_px, map_locale, padded_range, row_tick, squeeze_range,
};
use crate::layout::{Annotation, label_offset, layout_line_labels};
use crate::style::{Rgba, series_colors};
use crate::viz_plotters_adapter::{label_style, line_style};

/// Everything decided before a pixel is drawn.
#[derive(Debug, Clone)]
pub(crate) struct LinePlan {
    pub y_range: (f64, f64),
    pub offset: f64,
    pub colors: Vec<Rgba>,
    pub labels: Vec<Annotation>,
}

pub(crate) fn plan_line_chart(req: &LineChartRequest<'_>) -> Result<LinePlan> {
    let table = req.chart.table;
    let cfg = &req.chart.config;
    let (lo, hi) = table
        .value_range()
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;

    // Outside squeeze mode the axis always spans the zero reference line.
    let y_range = if req.squeeze {
        squeeze_range(lo, hi)?
    } else {
        padded_range(lo.min(0.0), hi.max(0.0))
    };
    let colors = series_colors(table.n_columns(), req.chart.colors.as_deref());

    let candidates: Vec<Annotation> = table
        .columns()
        .iter()
        .zip(&colors)
        .filter_map(|(col, color)| col.last_value().map(|v| Annotation::at_value(v, *color)))
        .collect();

    let offset = label_offset(y_range.0, y_range.1, cfg.line_label_divisor);
    let labels = layout_line_labels(&candidates, offset)?;
    debug!(
        "line chart: y-range {:?}, label offset {offset:.4}, {} labels",
        y_range,
        labels.len()
    );

    Ok(LinePlan {
        y_range,
        offset,
        colors,
        labels,
    })
}

pub(crate) fn draw_line_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    req: &LineChartRequest<'_>,
    plan: &LinePlan,
    figure: &Figure,
) -> Result<()> {
    let table = req.chart.table;
    let font_px = figure.font_px();
    let (num_locale, dec_sep) = map_locale(&req.chart.config.locale);
    let (ymin, ymax) = plan.y_range;
    let x_max = table.n_rows().saturating_sub(1).max(1) as f64;

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    // The labels live to the right of the plot, so reserve room for the widest one.
    let label_w = plan
        .labels
        .iter()
        .map(|a| estimate_text_width_px(&format_label(a.value, num_locale, dec_sep), font_px))
        .max()
        .unwrap_or(0);
    let margin = figure.pt_px(6.0).max(1) as u32;
    let right_margin = label_w + figure.pt_px(4.0) as u32 + margin;
    let y_label_count = 8usize;
    let left_label_px =
        compute_left_label_area_px(ymin, ymax, y_label_count, font_px, num_locale, dec_sep);

    let mut chart = ChartBuilder::on(root)
        .margin(margin)
        .margin_right(right_margin)
        .caption(req.chart.title.as_str(), (FontFamily::SansSerif, font_px))
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, (font_px * 2.0) as u32)
        .build_cartesian_2d(0f64..x_max, ymin..ymax)
        .map_err(|e| anyhow!("{:?}", e))?;

    let index = table.index();
    let x_label_fmt = |x: &f64| row_tick(index, *x);
    let y_label_fmt = |v: &f64| format_tick(*v, num_locale, dec_sep);
    let grid = RGBColor(166, 166, 166).stroke_width(figure.pt_px(0.5).max(1) as u32);

    chart
        .configure_mesh()
        .y_desc(req.chart.ylabel.as_str())
        .x_labels(table.n_rows().min(8))
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .bold_line_style(grid)
        .light_line_style(WHITE.mix(0.0))
        .label_style((FontFamily::SansSerif, font_px))
        .axis_desc_style((FontFamily::SansSerif, font_px))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    if ymin <= 0.0 && ymax >= 0.0 {
        chart
            .draw_series(LineSeries::new(
                vec![(0.0, 0.0), (x_max, 0.0)],
                BLACK.stroke_width(figure.pt_px(1.5).max(1) as u32),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let legend = req.chart.legend_texts();
    let stroke_px = figure.pt_px(1.0).max(1) as u32;
    let swatch_px = figure.pt_px(14.0);
    for ((col, color), text) in table.columns().iter().zip(&plan.colors).zip(legend) {
        let points: Vec<(f64, f64)> = col
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| (i as f64, *v))
            .collect();
        let stroke = line_style(color, stroke_px);
        chart
            .draw_series(LineSeries::new(points, stroke))
            .map_err(|e| anyhow!("{:?}", e))?
            .label(text)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + swatch_px, y)], stroke));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .border_style(WHITE.mix(0.0))
        .background_style(WHITE.mix(0.0))
        .label_font((FontFamily::SansSerif, font_px))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Labels sit just past the right edge of the plotting area.
    let (x_px, _) = chart.plotting_area().get_pixel_range();
    let label_x = x_px.end + figure.pt_px(4.0);
    for a in &plan.labels {
        let (_, y_px) = chart.backend_coord(&(x_max, a.position));
        let style = label_style(&a.color, font_px).pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(
            format_label(a.value, num_locale, dec_sep),
            (label_x, y_px),
            style,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, Table};
    use crate::viz::types::ChartRequest;

    fn table() -> Table {
        Table::new(
            vec!["2024-01-31".into(), "2024-02-29".into(), "2024-03-31".into()],
            vec![
                Column::new("Portfolio", vec![10.0, 11.0, 12.34]),
                Column::new("Benchmark", vec![10.0, 11.5, 12.5]),
                Column::new("Cash", vec![0.0, 0.1, 0.2]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn plan_separates_close_endpoints() {
        let t = table();
        let req = LineChartRequest {
            chart: ChartRequest::new(&t, "T", "Y", "", "x"),
            squeeze: false,
        };
        let plan = plan_line_chart(&req).unwrap();
        assert_eq!(plan.labels.len(), 3);
        let values: Vec<f64> = plan.labels.iter().map(|a| a.value).collect();
        assert_eq!(values, vec![0.2, 12.34, 12.5]);
        assert!(plan.labels[2].position - plan.labels[1].position >= plan.offset - 1e-12);
        assert_eq!(plan.labels[0].position, 0.2);
    }

    #[test]
    fn unsqueezed_axis_reaches_down_to_zero() {
        let t = Table::new(
            vec!["a".into(), "b".into()],
            vec![
                Column::new("Fund", vec![100.0, 110.0]),
                Column::new("Index", vec![100.0, 110.2]),
            ],
        )
        .unwrap();
        let req = LineChartRequest {
            chart: ChartRequest::new(&t, "", "", "", "x"),
            squeeze: false,
        };
        let plan = plan_line_chart(&req).unwrap();
        let (ymin, ymax) = plan.y_range;
        assert!(ymin <= 0.0 && ymax >= 110.2);
        assert!((ymin - -5.51).abs() < 1e-9);
        assert!((plan.offset - (ymax - ymin) / 32.0).abs() < 1e-12);
        assert!(plan.offset > 3.5);
        assert_eq!(plan.labels[0].position, 110.0);
        assert!((plan.labels[1].position - (110.0 + plan.offset)).abs() < 1e-9);
    }

    #[test]
    fn squeeze_uses_rounded_extremes() {
        let t = table();
        let req = LineChartRequest {
            chart: ChartRequest::new(&t, "T", "Y", "", "x"),
            squeeze: true,
        };
        let plan = plan_line_chart(&req).unwrap();
        assert_eq!(plan.y_range, (0.0, 20.0));
        assert_eq!(plan.offset, 20.0 / 32.0);
    }
}
