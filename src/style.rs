//! Series colors: RGBA values, color-spec parsing, and per-series assignment.
//!
//! Colors can be given the way chart users usually type them:
//! single letters (`b g r c m y k w`), a handful of common names, or `#rrggbb`.
//! When no colors are supplied, series take the Microsoft Office chart palette
//! in order.
//!
//! # Example
//!
//! ```rust
//! use portfolio_charts::style::{Rgba, series_colors};
//!
//! let explicit = vec![Rgba::parse("g").unwrap(), Rgba::parse("#ff0000").unwrap()];
//! let colors = series_colors(3, Some(&explicit));
//! // cycles: green, red, green
//! assert_eq!(colors[0], colors[2]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a color spec: letter, name, or `#rrggbb` / `#rrggbbaa`.
    pub fn parse(spec: &str) -> Option<Self> {
        let s = spec.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
    }

    /// Lowercase `#rrggbb` form (alpha omitted when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::parse(s).ok_or_else(|| format!("unknown color '{s}'"))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

// Single letters follow the classic matplotlib shorthand.
const NAMED: [(&str, Rgba); 24] = [
    ("b", Rgba::rgb(0, 0, 255)),
    ("g", Rgba::rgb(0, 128, 0)),
    ("r", Rgba::rgb(255, 0, 0)),
    ("c", Rgba::rgb(0, 191, 191)),
    ("m", Rgba::rgb(191, 0, 191)),
    ("y", Rgba::rgb(191, 191, 0)),
    ("k", Rgba::rgb(0, 0, 0)),
    ("w", Rgba::rgb(255, 255, 255)),
    ("blue", Rgba::rgb(0, 0, 255)),
    ("green", Rgba::rgb(0, 128, 0)),
    ("red", Rgba::rgb(255, 0, 0)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("black", Rgba::rgb(0, 0, 0)),
    ("white", Rgba::rgb(255, 255, 255)),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("navy", Rgba::rgb(0, 0, 128)),
    ("darkgreen", Rgba::rgb(0, 100, 0)),
    ("darkred", Rgba::rgb(139, 0, 0)),
    ("gold", Rgba::rgb(255, 215, 0)),
];

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
pub const OFFICE10: [Rgba; 10] = [
    Rgba::rgb(68, 114, 196),  // blue      (#4472C4)
    Rgba::rgb(237, 125, 49),  // orange    (#ED7D31)
    Rgba::rgb(165, 165, 165), // gray      (#A5A5A5)
    Rgba::rgb(255, 192, 0),   // gold      (#FFC000)
    Rgba::rgb(91, 155, 213),  // light blue(#5B9BD5)
    Rgba::rgb(112, 173, 71),  // green     (#70AD47)
    Rgba::rgb(38, 68, 120),   // dark blue (#264478)
    Rgba::rgb(158, 72, 14),   // dark org. (#9E480E)
    Rgba::rgb(99, 99, 99),    // dark gray (#636363)
    Rgba::rgb(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> Rgba {
    OFFICE10[idx % OFFICE10.len()]
}

/// Assign one color per series. Explicit colors cycle when there are fewer
/// of them than series; an empty or missing list falls back to the palette.
pub fn series_colors(n: usize, explicit: Option<&[Rgba]>) -> Vec<Rgba> {
    match explicit {
        Some(list) if !list.is_empty() => (0..n).map(|i| list[i % list.len()]).collect(),
        _ => (0..n).map(office_color).collect(),
    }
}

/// Parse a comma/semicolon separated list of color specs.
pub fn parse_color_list(s: &str) -> Result<Vec<Rgba>, String> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_names_and_hex() {
        assert_eq!(Rgba::parse("g"), Some(Rgba::rgb(0, 128, 0)));
        assert_eq!(Rgba::parse(" Red "), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::parse("#4472C4"), Some(Rgba::rgb(68, 114, 196)));
        assert_eq!(Rgba::parse("#00000080"), Some(Rgba::new(0, 0, 0, 128)));
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("chartreuse-ish"), None);
    }

    #[test]
    fn hex_round_trip_display() {
        let c = Rgba::rgb(237, 125, 49);
        assert_eq!(c.to_string(), "#ed7d31");
        assert_eq!(Rgba::parse(&c.to_hex()), Some(c));
    }

    #[test]
    fn palette_fallback_and_cycling() {
        let auto = series_colors(12, None);
        assert_eq!(auto[0], OFFICE10[0]);
        assert_eq!(auto[10], OFFICE10[0]);

        let empty: Vec<Rgba> = Vec::new();
        assert_eq!(series_colors(2, Some(&empty)), vec![OFFICE10[0], OFFICE10[1]]);

        let list = parse_color_list("g; r").unwrap();
        let cyc = series_colors(3, Some(&list));
        assert_eq!(cyc, vec![list[0], list[1], list[0]]);
    }

    #[test]
    fn bad_color_in_list_is_reported() {
        let err = parse_color_list("g,notacolor").unwrap_err();
        assert!(err.contains("notacolor"));
    }
}
