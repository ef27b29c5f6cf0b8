//! Label layout: keep value labels readable when their natural positions collide.
//!
//! Two strategies live here, both pure functions over plain records so they can
//! be exercised without drawing anything:
//!
//! - [`layout_line_labels`] stacks the endpoint labels of a line chart into one
//!   column, sorted by value, pushing each label up just enough to clear the one
//!   below it.
//! - [`layout_bar_group`] splits one bar group's labels by sign and stacks each
//!   side outward from the group's extreme values.
//!
//! Positions are in data units (the y-axis of the chart). The spacing between
//! labels is derived from the visible axis range by [`label_offset`].

use crate::error::LayoutError;
use crate::style::Rgba;
use log::debug;
use serde::{Deserialize, Serialize};

/// A label to draw: the number shown, its color, and where it sits on the y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub value: f64,
    pub color: Rgba,
    pub position: f64,
}

impl Annotation {
    /// A candidate sitting at its own value, which is where a line's endpoint label starts.
    pub fn at_value(value: f64, color: Rgba) -> Self {
        Self {
            value,
            color,
            position: value,
        }
    }
}

/// Vertical spacing between adjacent labels for a given axis range.
///
/// `divisor` is tuned to the font and figure size (32 for line charts, 25 for
/// bar charts at 8 pt on a 7.25 x 4.5 in canvas).
pub fn label_offset(y_min: f64, y_max: f64, divisor: f64) -> f64 {
    (y_max - y_min) / divisor
}

/// Resolve overlaps between line endpoint labels.
///
/// Labels are sorted ascending by value (stable, so ties keep input order), then
/// swept once from the bottom: any label closer than `offset` to the label
/// below it is moved to exactly `offset` above that label. Labels that are
/// already far enough apart keep their positions.
pub fn layout_line_labels(
    candidates: &[Annotation],
    offset: f64,
) -> Result<Vec<Annotation>, LayoutError> {
    for c in candidates {
        if !c.value.is_finite() {
            return Err(LayoutError::NonFinite(c.value));
        }
        if !c.position.is_finite() {
            return Err(LayoutError::NonFinite(c.position));
        }
    }

    let mut out = candidates.to_vec();
    out.sort_by(|a, b| a.value.total_cmp(&b.value));

    for i in 1..out.len() {
        let prev = out[i - 1].position;
        if out[i].position - prev < offset {
            debug!(
                "line label {:.3}: {:.3} -> {:.3}",
                out[i].value,
                out[i].position,
                prev + offset
            );
            out[i].position = prev + offset;
        }
    }
    Ok(out)
}

/// A drawn bar with its signed data value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Left edge in data coordinates.
    pub x: f64,
    /// Signed value; negative bars hang below zero.
    pub value: f64,
    pub color: Rgba,
}

impl Bar {
    pub fn new(x: f64, value: f64, color: Rgba) -> Self {
        Self { x, value, color }
    }

    /// Recover the signed value from rectangle geometry (origin `y`, `height`):
    /// a negative origin is the value itself, otherwise the height is.
    pub fn from_geometry(x: f64, y: f64, height: f64, color: Rgba) -> Self {
        let value = if y < 0.0 { y } else { height };
        Self { x, value, color }
    }
}

/// Laid-out labels for one bar group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarGroupLabels {
    /// Left edge of the group's first bar.
    pub x: f64,
    /// Non-negative values, in encounter order, stacked upward.
    pub positive: Vec<Annotation>,
    /// Negative values, in encounter order, stacked downward.
    pub negative: Vec<Annotation>,
}

/// Stack one group's labels outward from the group's extreme values.
///
/// Both stacks start from group-level extremes: the positive side from the
/// largest value, the negative side from the smallest. The negative side steps
/// a full `offset` each time; the positive side's first step is
/// `offset * first_step_ratio` and later steps are a full `offset`.
pub fn layout_bar_group(
    bars: &[Bar],
    x: f64,
    offset: f64,
    first_step_ratio: f64,
) -> Result<BarGroupLabels, LayoutError> {
    let mut labels = BarGroupLabels {
        x,
        ..Default::default()
    };
    if bars.is_empty() {
        return Ok(labels);
    }
    if let Some(b) = bars.iter().find(|b| !b.value.is_finite()) {
        return Err(LayoutError::NonFinite(b.value));
    }

    let pos_anchor = bars.iter().map(|b| b.value).fold(f64::NEG_INFINITY, f64::max);
    let neg_anchor = bars.iter().map(|b| b.value).fold(f64::INFINITY, f64::min);

    let mut pos_y = pos_anchor;
    let mut neg_y = neg_anchor;
    for bar in bars {
        if bar.value >= 0.0 {
            pos_y += if labels.positive.is_empty() {
                offset * first_step_ratio
            } else {
                offset
            };
            labels.positive.push(Annotation {
                value: bar.value,
                color: bar.color,
                position: pos_y,
            });
        } else {
            neg_y -= offset;
            labels.negative.push(Annotation {
                value: bar.value,
                color: bar.color,
                position: neg_y,
            });
        }
    }
    Ok(labels)
}

/// Sort bars by x, chunk them into groups of `group_size`, and lay out each
/// group independently.
///
/// Fails before laying anything out when the bar count is not a multiple of
/// `group_size`.
pub fn layout_bar_groups(
    bars: &[Bar],
    group_size: usize,
    offset: f64,
    first_step_ratio: f64,
) -> Result<Vec<BarGroupLabels>, LayoutError> {
    let mut sorted = bars.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let groups = chunk_exact(&sorted, group_size)?;
    groups
        .into_iter()
        .map(|group| {
            let x = group.first().map(|b| b.x).unwrap_or(0.0);
            layout_bar_group(group, x, offset, first_step_ratio)
        })
        .collect()
}

/// Split `items` into consecutive groups of exactly `size` elements.
pub fn chunk_exact<T>(items: &[T], size: usize) -> Result<Vec<&[T]>, LayoutError> {
    if size == 0 {
        return Err(LayoutError::ZeroGroupSize);
    }
    if items.len() % size != 0 {
        return Err(LayoutError::ChunkSize {
            len: items.len(),
            size,
        });
    }
    Ok(items.chunks_exact(size).collect())
}

/// Direction for [`round_to_magnitude`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    Up,
    Down,
    Nearest,
}

/// Round to the leading digit of the value's power of ten.
///
/// `round_to_magnitude(1_234_567_890.0, Rounding::Up)` is `2_000_000_000.0`.
/// Zero has no magnitude and is rejected.
pub fn round_to_magnitude(value: f64, dir: Rounding) -> Result<f64, LayoutError> {
    if !value.is_finite() {
        return Err(LayoutError::NonFinite(value));
    }
    if value == 0.0 {
        return Err(LayoutError::ZeroMagnitude);
    }
    let base = 10f64.powi(value.abs().log10().floor() as i32);
    let scaled = value / base;
    let steps = match dir {
        Rounding::Up => scaled.ceil(),
        Rounding::Down => scaled.floor(),
        Rounding::Nearest => scaled.round(),
    };
    Ok(base * steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Rgba = Rgba::rgb(0, 0, 0);

    #[test]
    fn single_label_untouched() {
        let out = layout_line_labels(&[Annotation::at_value(3.0, C)], 1.0).unwrap();
        assert_eq!(out[0].position, 3.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let a = Annotation::at_value(1.0, Rgba::rgb(1, 0, 0));
        let b = Annotation::at_value(1.0, Rgba::rgb(2, 0, 0));
        let out = layout_line_labels(&[a, b], 0.5).unwrap();
        assert_eq!(out[0].color, a.color);
        assert_eq!(out[1].color, b.color);
        assert_eq!(out[1].position, 1.5);
    }

    #[test]
    fn nan_rejected() {
        let err = layout_line_labels(&[Annotation::at_value(f64::NAN, C)], 1.0).unwrap_err();
        assert!(matches!(err, LayoutError::NonFinite(_)));
    }

    #[test]
    fn geometry_recovers_sign() {
        assert_eq!(Bar::from_geometry(0.0, -3.0, 3.0, C).value, -3.0);
        assert_eq!(Bar::from_geometry(0.0, 0.0, 5.0, C).value, 5.0);
    }

    #[test]
    fn chunk_zero_size() {
        assert_eq!(chunk_exact(&[1, 2], 0), Err(LayoutError::ZeroGroupSize));
    }

    #[test]
    fn all_negative_group_has_no_positive_stack() {
        let bars = [Bar::new(0.0, -1.0, C), Bar::new(0.1, -2.0, C)];
        let g = layout_bar_group(&bars, 0.0, 1.0, 0.5).unwrap();
        assert!(g.positive.is_empty());
        let pos: Vec<f64> = g.negative.iter().map(|a| a.position).collect();
        assert_eq!(pos, vec![-3.0, -4.0]);
    }
}
