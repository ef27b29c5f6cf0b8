//! An explicitly owned figure: canvas size, resolution, and point-to-pixel math.
//!
//! Each render call builds its own `Figure`; nothing is shared between calls.

use crate::config::ChartConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub font_pt: f64,
}

impl Figure {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            width_in: cfg.width_in,
            height_in: cfg.height_in,
            dpi: cfg.dpi,
            font_pt: cfg.font_pt,
        }
    }

    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let d = self.dpi as f64;
        (
            (self.width_in * d).round() as u32,
            (self.height_in * d).round() as u32,
        )
    }

    /// Points (1/72 in) to pixels.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    pub fn pt_px(&self, points: f64) -> i32 {
        self.pt(points).round() as i32
    }

    pub fn font_px(&self) -> f64 {
        self.pt(self.font_pt)
    }
}
