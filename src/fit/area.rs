//! Area heuristic: propose a smaller starting font size before wrapping.

use super::types::FitConstants;
use crate::models::BoxSize;

/// Estimate a starting font size for `font_size` given the measured widths of
/// every wrappable unit at that size.
///
/// The text is treated as a block of area `sum(width * line_height)` scaled by
/// an aspect correction; if that block (or its widest unit) does not fit the
/// box, the size is scaled down by the smaller of the area and width ratios.
/// The result is always capped at `height_ceiling` of the box height.
///
/// This narrows the search only; a real wrap pass still decides the fit.
pub fn estimate_font_size(
    widths: &[f64],
    bounds: BoxSize,
    line_height: f64,
    font_size: f64,
    c: &FitConstants,
) -> f64 {
    let (w, h) = (bounds.width, bounds.height);
    let area_mod = c.area_base + (w / h) * c.area_aspect_weight;
    let box_area = w * h;
    let max_width = widths.iter().copied().fold(0.0_f64, f64::max);
    let text_area = widths.iter().map(|uw| uw * line_height).sum::<f64>() * area_mod;

    let mut size = font_size;
    if max_width > w || text_area > box_area {
        let area_ratio = if text_area > 0.0 {
            (box_area / text_area).sqrt()
        } else {
            1.0
        };
        let width_ratio = if max_width > 0.0 { w / max_width } else { 1.0 };
        let shrink = area_ratio.min(width_ratio);
        size = (size * shrink).floor();
        log::debug!(
            "area estimate: text_area={text_area:.1} box_area={box_area:.1} max_width={max_width:.1} shrink={shrink:.3} -> {size}"
        );
    }

    let height_max = (h * c.height_ceiling).floor();
    if size > height_max {
        size = height_max;
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c() -> FitConstants {
        FitConstants::default()
    }

    #[test]
    fn no_shrink_when_text_is_small() {
        let got = estimate_font_size(&[30.0, 30.0], BoxSize::new(200.0, 200.0), 14.0, 10.0, &c());
        assert_eq!(got, 10.0);
    }

    #[test]
    fn caps_at_share_of_height() {
        // 20 * 0.8 = 16
        let got = estimate_font_size(&[10.0], BoxSize::new(500.0, 20.0), 42.0, 30.0, &c());
        assert_eq!(got, 16.0);
    }

    #[test]
    fn shrinks_by_width_ratio_for_wide_word() {
        // max width 200 in a 100 box: width ratio 0.5; area is small
        let got = estimate_font_size(&[200.0], BoxSize::new(100.0, 1000.0), 28.0, 20.0, &c());
        assert_eq!(got, 10.0);
    }

    #[test]
    fn shrinks_by_area_ratio() {
        // box 100x100, area_mod = 1.265; widths sum 400 * lH 28 = 11200 * 1.265 = 14168
        // ratio sqrt(10000 / 14168) = 0.8401..; floor(20 * 0.8401) = 16
        let got = estimate_font_size(
            &[80.0, 80.0, 80.0, 80.0, 80.0],
            BoxSize::new(100.0, 100.0),
            28.0,
            20.0,
            &c(),
        );
        assert_eq!(got, 16.0);
    }

    #[test]
    fn empty_units_keep_size() {
        let got = estimate_font_size(&[], BoxSize::new(100.0, 100.0), 14.0, 10.0, &c());
        assert_eq!(got, 10.0);
    }
}
