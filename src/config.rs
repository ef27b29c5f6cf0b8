//! Rendering configuration shared by both chart kinds.
//!
//! Every field has a default matching the standard report figure
//! (7.25 x 4.5 in at 300 DPI, 8 pt text). A partial JSON file can override any
//! subset of fields:
//!
//! ```json
//! { "dpi": 150, "line_label_divisor": 24 }
//! ```

use crate::viz::types::ImageFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Canvas width in inches.
    pub width_in: f64,
    /// Canvas height in inches.
    pub height_in: f64,
    pub dpi: u32,
    /// Title, tick, legend and label size in points.
    pub font_pt: f64,
    /// Axis range / divisor = line label spacing.
    pub line_label_divisor: f64,
    /// Axis range / divisor = bar label spacing.
    pub bar_label_divisor: f64,
    /// Extra room above and below the bars, in label offsets.
    pub bar_headroom: f64,
    /// First upward step of a positive bar-label stack, as a fraction of the offset.
    pub bar_first_step_ratio: f64,
    /// Locale tag for number formatting ("en", "de", ...).
    pub locale: String,
    pub format: ImageFormat,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_in: 7.25,
            height_in: 4.5,
            dpi: 300,
            font_pt: 8.0,
            line_label_divisor: 32.0,
            bar_label_divisor: 25.0,
            bar_headroom: 4.0,
            bar_first_step_ratio: 0.5,
            locale: "en".to_string(),
            format: ImageFormat::Png,
        }
    }
}

impl ChartConfig {
    /// Load a config from a JSON file; missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: ChartConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make the figure or the label spacing degenerate.
    pub fn validate(&self) -> Result<()> {
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            anyhow::bail!("figure size must be positive");
        }
        if self.dpi == 0 {
            anyhow::bail!("dpi must be positive");
        }
        if !(self.line_label_divisor > 0.0 && self.bar_label_divisor > 0.0) {
            anyhow::bail!("label divisors must be positive");
        }
        if !(self.font_pt > 0.0) {
            anyhow::bail!("font size must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "dpi": 150, "format": "svg" }}"#).unwrap();
        let cfg = ChartConfig::from_json_file(f.path()).unwrap();
        assert_eq!(cfg.dpi, 150);
        assert_eq!(cfg.format, ImageFormat::Svg);
        assert_eq!(cfg.line_label_divisor, 32.0);
        assert_eq!(cfg.bar_first_step_ratio, 0.5);
    }

    #[test]
    fn zero_divisor_rejected() {
        let cfg = ChartConfig {
            bar_label_divisor: 0.0,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
