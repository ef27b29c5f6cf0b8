//! Utility functions for visualization: axis ranges, locale mapping, tick labels.

use anyhow::Result;
use chrono::NaiveDate;
use num_format::Locale;

use super::text::{estimate_text_width_px, format_tick};
use crate::layout::{Rounding, round_to_magnitude};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Data extent padded by 5 % of its span; a flat series gets +/- 1.
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * 0.05, hi + span * 0.05)
}

/// Range used before bar labels are laid out: always includes zero, and only
/// the side away from zero gets padding.
pub fn bar_base_range(lo: f64, hi: f64) -> (f64, f64) {
    let lo0 = lo.min(0.0);
    let hi0 = hi.max(0.0);
    let span = hi0 - lo0;
    if span.abs() < f64::EPSILON {
        return (-1.0, 1.0);
    }
    let pad = span * 0.05;
    (
        if lo0 < 0.0 { lo0 - pad } else { lo0 },
        if hi0 > 0.0 { hi0 + pad } else { hi0 },
    )
}

/// Tight y-range from the data's rounded extremes (the "squeeze" mode).
///
/// A zero extreme already sits on a boundary and is kept as is.
pub fn squeeze_range(lo: f64, hi: f64) -> Result<(f64, f64)> {
    let bottom = if lo == 0.0 {
        0.0
    } else {
        round_to_magnitude(lo, Rounding::Down)?
    };
    let top = if hi == 0.0 {
        0.0
    } else {
        round_to_magnitude(hi, Rounding::Up)?
    };
    if top > bottom {
        Ok((bottom, top))
    } else {
        Ok(padded_range(bottom, top))
    }
}

/// Short x tick text for a row label: ISO dates become "Jan 2020", anything
/// else is shown verbatim.
pub fn short_row_label(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => d.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Tick text at an x position when ticks sit on row indices; off-row ticks stay blank.
pub fn row_tick(index: &[String], x: f64) -> String {
    let r = x.round();
    if (x - r).abs() > 1e-6 || r < 0.0 {
        return String::new();
    }
    index
        .get(r as usize)
        .map(|s| short_row_label(s))
        .unwrap_or_default()
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a range proportional to the font size.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: f64,
    locale: &Locale,
    dec_sep: char,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(estimate_text_width_px(&format_tick(v, locale, dec_sep), font_px));
    }

    // Room for the axis description and tick marks.
    let with_padding = max_px.saturating_add((font_px * 2.5) as u32);
    with_padding.clamp((font_px * 4.0) as u32, (font_px * 12.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squeeze_rounds_outward() {
        let (lo, hi) = squeeze_range(123.0, 1_234_567_890.0).unwrap();
        assert_eq!(lo, 100.0);
        assert_eq!(hi, 2_000_000_000.0);
    }

    #[test]
    fn squeeze_keeps_zero() {
        assert_eq!(squeeze_range(0.0, 87.0).unwrap(), (0.0, 90.0));
        assert_eq!(squeeze_range(-4.2, 0.0).unwrap(), (-5.0, 0.0));
    }

    #[test]
    fn bar_range_includes_zero() {
        let (lo, hi) = bar_base_range(2.0, 10.0);
        assert_eq!(lo, 0.0);
        assert!((hi - 10.5).abs() < 1e-9);
    }

    #[test]
    fn date_ticks() {
        let idx = vec!["2020-01-31".to_string(), "Q2".to_string()];
        assert_eq!(row_tick(&idx, 0.0), "Jan 2020");
        assert_eq!(row_tick(&idx, 1.0), "Q2");
        assert_eq!(row_tick(&idx, 0.5), "");
        assert_eq!(row_tick(&idx, 7.0), "");
    }

    #[test]
    fn locale_mapping() {
        assert_eq!(map_locale("DE").1, ',');
        assert_eq!(map_locale("xx").1, '.');
    }
}
