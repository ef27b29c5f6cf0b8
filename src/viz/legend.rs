//! Legend drawing for the external (right-hand) legend panel used by bar charts.
//!
//! The panel sits beside the plot, so entries never cover bars or labels.
//! Each entry is a filled swatch followed by the label, wrapped to the panel
//! width.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::wrap_text_to_width;
use crate::style::Rgba;
use crate::viz_plotters_adapter::fill_style;

/// Pixel height the panel needs for `labels` at `font_px`, given the panel width.
pub fn estimate_right_legend_height_px(labels: &[String], panel_w: i32, font_px: f64) -> i32 {
    let m = Metrics::new(font_px);
    let max_text_w = (panel_w - m.text_x - m.pad).max(m.swatch) as u32;
    labels
        .iter()
        .map(|l| {
            let lines = wrap_text_to_width(l, font_px, max_text_w).len().max(1) as i32;
            lines * m.line_h + m.row_gap
        })
        .sum()
}

struct Metrics {
    line_h: i32,
    row_gap: i32,
    pad: i32,
    swatch: i32,
    text_x: i32,
}

impl Metrics {
    fn new(font_px: f64) -> Self {
        let line_h = (font_px * 1.25).round() as i32;
        let swatch = (font_px * 0.7).round() as i32;
        let pad = (font_px * 0.3).round() as i32;
        Self {
            line_h,
            row_gap: (font_px * 0.3).round() as i32,
            pad,
            swatch,
            text_x: pad + swatch + (font_px * 0.5).round() as i32,
        }
    }
}

/// Draw legend entries top-down, starting `top_px` below the panel's top edge
/// (aligned with the top of the plotting area).
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[(String, Rgba)],
    top_px: i32,
    font_px: f64,
) -> Result<()> {
    let (w_u32, _) = legend_area.dim_in_pixel();
    let w = w_u32 as i32;
    let m = Metrics::new(font_px);
    let max_text_w = (w - m.text_x - m.pad).max(m.swatch) as u32;
    let text_style =
        TextStyle::from((FontFamily::SansSerif, font_px)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = top_px;
    for (label, color) in items {
        let lines = wrap_text_to_width(label, font_px, max_text_w);
        let first_center = y + m.line_h / 2;

        legend_area
            .draw(&Rectangle::new(
                [
                    (m.pad, first_center - m.swatch / 2),
                    (m.pad + m.swatch, first_center + m.swatch / 2),
                ],
                fill_style(color),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        for (i, line) in lines.iter().enumerate() {
            let center = y + i as i32 * m.line_h + m.line_h / 2;
            legend_area
                .draw(&Text::new(line.as_str(), (m.text_x, center), text_style.clone()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }

        y += lines.len().max(1) as i32 * m.line_h + m.row_gap;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_need_more_height() {
        let short = vec!["A".to_string(), "B".to_string()];
        let long = vec![
            "A rather long benchmark description".to_string(),
            "B".to_string(),
        ];
        let h_short = estimate_right_legend_height_px(&short, 200, 20.0);
        let h_long = estimate_right_legend_height_px(&long, 200, 20.0);
        assert!(h_long > h_short);
    }
}
