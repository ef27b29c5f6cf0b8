//! Adapter helpers to use [`Rgba`] series colors with the plotters crate.
//!
//! Usage example (inside a plotting function):
//! ```ignore
//!     use crate::viz_plotters_adapter::{line_style, fill_style};
//!
//!     chart.draw_series(LineSeries::new(points, line_style(&color, 4)))?;
//!     chart.draw_series(std::iter::once(Rectangle::new(corners, fill_style(&color))))?;
//! ```

use plotters::prelude::*;

use crate::style::Rgba;

pub fn rgba_color(c: &Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a as f64 / 255.0)
}

/// Build a ShapeStyle for line strokes.
pub fn line_style(c: &Rgba, width_px: u32) -> ShapeStyle {
    rgba_color(c).stroke_width(width_px.max(1))
}

/// Build a filled style for bars and legend swatches.
pub fn fill_style(c: &Rgba) -> ShapeStyle {
    rgba_color(c).filled()
}

/// Text style for a value label drawn in its series color.
pub fn label_style(c: &Rgba, font_px: f64) -> TextStyle<'static> {
    (FontFamily::SansSerif, font_px).into_font().color(&rgba_color(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_style_carries_series_color() {
        let style = label_style(&Rgba::new(10, 20, 30, 255), 12.0);
        assert_eq!(style.color.rgb, (10, 20, 30));
        assert_eq!(style.color.alpha, 1.0);
        assert_eq!(style.font.get_size(), 12.0);
    }
}
