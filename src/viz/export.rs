//! Output paths, font registration, and presenting finished drawing areas.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::sync::Once;

use super::types::ImageFormat;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

pub(crate) fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::warn!("embedded sans-serif font could not be registered");
        }
    });
}

/// `<filepath><filename>.<ext>`: the directory part is a plain prefix.
pub fn output_path(filepath: &str, filename: &str, format: ImageFormat) -> String {
    format!("{filepath}{filename}.{}", format.extension())
}

/// Flush a drawing area to its backend (writes the file for file-backed backends).
pub(crate) fn present<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> Result<()> {
    area.present().map_err(|e| anyhow!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_prefix_concatenation() {
        assert_eq!(output_path("out/", "perf", ImageFormat::Png), "out/perf.png");
        assert_eq!(output_path("", "perf", ImageFormat::Svg), "perf.svg");
        assert_eq!(output_path("/tmp/rep_", "q1", ImageFormat::Png), "/tmp/rep_q1.png");
    }
}
