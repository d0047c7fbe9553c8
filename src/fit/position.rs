//! Vertical offset and horizontal pivot for an accepted fit.

use super::types::FitConstants;
use crate::models::{TextAnchor, VerticalAlign};

/// Offset of the first line from the box top, baseline correction included.
pub fn vertical_offset(
    align: VerticalAlign,
    box_height: f64,
    line_count: usize,
    line_height: f64,
    c: &FitConstants,
) -> f64 {
    let total = line_count as f64 * line_height;
    let offset = match align {
        VerticalAlign::Top => 0.0,
        VerticalAlign::Middle => box_height / 2.0 - total / 2.0,
        VerticalAlign::Bottom => box_height - total,
    };
    offset - line_height * c.baseline_shift
}

/// Horizontal pivot inside a box of `width` for the given anchor.
pub fn horizontal_pivot(anchor: TextAnchor, width: f64) -> f64 {
    match anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => width / 2.0,
        TextAnchor::End => width,
    }
}
