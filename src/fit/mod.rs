//! Fitting core: choose a font size, wrap, truncate, and position text inside a box.
//!
//! - Optional font resizing within `[font_min, font_max]`, seeded by an area heuristic
//! - Strictly decreasing size search verified by real wrap passes
//! - Ellipsis truncation when the text cannot fit at a fixed size
//! - Vertical alignment (`top`, `middle`, `bottom`) with baseline compensation
//!
//! Every outcome is data: "nothing fits" is a [`FitResult`] with no lines.

pub mod area;
pub mod ellipsis;
pub mod position;
pub mod types;

pub use ellipsis::{ELLIPSIS, apply_ellipsis, default_ellipsis};
pub use types::{DEFAULT_FIT_CONSTANTS, Ellipsis, FitConstants, FitOptions};

use crate::models::{BoxSize, FitResult, FontBounds, WrapResult};
use crate::text::{Measure, Wrap, split};

/// Mutable state of one item's size search.
#[derive(Debug, Clone)]
struct FitState {
    font_size: f64,
    line_height: f64,
}

enum Outcome {
    /// Wrapped without truncation.
    Fit(WrapResult),
    /// Truncated at a fixed size (or at the floor with `ellipsis_at_floor`).
    Truncated(WrapResult),
    /// Nothing can be shown.
    Empty,
}

/// True when the box can hold at least one line under these options.
///
/// Requires the width to exceed the minimum font size, and the height to
/// exceed one line (or, when resizing, one line at the minimum font size).
pub fn can_hold_a_line(bx: BoxSize, opts: &FitOptions) -> bool {
    let bounds = opts.bounds.normalized();
    let min_line = bounds.min * opts.constants.line_height_ratio;
    bx.width > bounds.min
        && (bx.height > opts.style.line_height || (opts.resize && bx.height > min_line))
}

/// Fit `text` into `bx`.
///
/// Pure for given inputs: calling it twice with the same arguments yields the
/// same result. The measurer seeds the area heuristic; the wrapper decides.
pub fn fit_text(
    text: &str,
    bx: BoxSize,
    opts: &FitOptions,
    measurer: &dyn Measure,
    wrapper: &dyn Wrap,
) -> FitResult {
    let bounds = opts.bounds.normalized();
    let c = &opts.constants;
    let mut state = FitState {
        font_size: opts.style.font_size,
        line_height: opts.style.line_height,
    };

    if !can_hold_a_line(bx, opts) {
        log::trace!("box {}x{} cannot hold a line", bx.width, bx.height);
        return FitResult::empty(state.font_size, state.line_height);
    }

    if opts.resize {
        let units = split(text);
        let refs: Vec<&str> = units.iter().map(String::as_str).collect();
        let widths = measurer.measure(&refs, &opts.style);
        state.font_size =
            area::estimate_font_size(&widths, bx, state.line_height, state.font_size, c);
    }

    match search(text, bx, opts, bounds, &mut state, wrapper) {
        Outcome::Fit(wrap) => finish(wrap.lines, wrap.widths, false, bx, opts, &state),
        Outcome::Truncated(wrap) => {
            let lines = apply_ellipsis(wrap.lines, &opts.ellipsis);
            // Re-measure: the marker changed the last line.
            let style = opts.style.with_size(state.font_size, state.line_height);
            let refs: Vec<&str> = lines.iter().map(|l| l.trim_end()).collect();
            let widths = measurer.measure(&refs, &style);
            finish(lines, widths, true, bx, opts, &state)
        }
        Outcome::Empty => FitResult::empty(state.font_size, state.line_height),
    }
}

fn search(
    text: &str,
    bx: BoxSize,
    opts: &FitOptions,
    bounds: FontBounds,
    state: &mut FitState,
    wrapper: &dyn Wrap,
) -> Outcome {
    // Negated comparison also rejects NaN sizes.
    if !(state.font_size >= bounds.min) {
        return floor_reached(text, bx, opts, bounds, state, wrapper);
    }
    let start = if state.font_size > bounds.max {
        bounds.max
    } else {
        state.font_size
    };
    // Sizes tried: start, start - 1, ... down to the last one not below the minimum.
    let attempts = (start - bounds.min).floor() as usize + 1;

    for step in 0..attempts {
        state.font_size = start - step as f64;
        if opts.resize {
            state.line_height = state.font_size * opts.constants.line_height_ratio;
        }

        let style = opts.style.with_size(state.font_size, state.line_height);
        let wrap = wrapper.wrap(text, &style, bx.width, bx.height, opts.overflow);
        log::trace!(
            "wrap at {}px: {} line(s), truncated={}",
            state.font_size,
            wrap.lines.len(),
            wrap.truncated
        );

        if !wrap.truncated {
            return Outcome::Fit(wrap);
        }
        if !opts.resize {
            return Outcome::Truncated(wrap);
        }
    }
    state.font_size = start - attempts as f64;
    floor_reached(text, bx, opts, bounds, state, wrapper)
}

fn floor_reached(
    text: &str,
    bx: BoxSize,
    opts: &FitOptions,
    bounds: FontBounds,
    state: &mut FitState,
    wrapper: &dyn Wrap,
) -> Outcome {
    log::debug!(
        "font size {} fell below minimum {}",
        state.font_size,
        bounds.min
    );
    if !(opts.resize && opts.ellipsis_at_floor) {
        return Outcome::Empty;
    }
    state.font_size = bounds.min;
    state.line_height = bounds.min * opts.constants.line_height_ratio;
    let style = opts.style.with_size(state.font_size, state.line_height);
    let wrap = wrapper.wrap(text, &style, bx.width, bx.height, opts.overflow);
    if wrap.truncated {
        Outcome::Truncated(wrap)
    } else {
        Outcome::Fit(wrap)
    }
}

fn finish(
    lines: Vec<String>,
    widths: Vec<f64>,
    truncated: bool,
    bx: BoxSize,
    opts: &FitOptions,
    state: &FitState,
) -> FitResult {
    let offset = if lines.is_empty() {
        0.0
    } else {
        position::vertical_offset(
            opts.vertical_align,
            bx.height,
            lines.len(),
            state.line_height,
            &opts.constants,
        )
    };
    FitResult {
        font_size: state.font_size,
        line_height: state.line_height,
        lines,
        widths,
        offset,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MAX_FONT_SIZE, Style, VerticalAlign};
    use crate::text::{GreedyWrapper, HeuristicMeasurer};
    use std::sync::Mutex;

    /// Reports truncation for every size above `largest_fit`; records sizes tried.
    struct ThresholdWrapper {
        largest_fit: f64,
        tried: Mutex<Vec<f64>>,
    }

    impl Wrap for ThresholdWrapper {
        fn wrap(&self, text: &str, style: &Style, _w: f64, _h: f64, _o: bool) -> WrapResult {
            self.tried.lock().unwrap().push(style.font_size);
            WrapResult {
                lines: vec![text.to_string()],
                widths: vec![0.0],
                truncated: style.font_size > self.largest_fit,
            }
        }
    }

    fn opts(font_size: f64) -> FitOptions {
        FitOptions {
            style: Style::new("sans-serif", "400", font_size),
            ..FitOptions::default()
        }
    }

    #[test]
    fn fixed_size_fit_keeps_size() {
        let m = HeuristicMeasurer::default();
        let w = GreedyWrapper::new(m);
        let r = fit_text("Hello World", BoxSize::new(200.0, 200.0), &opts(10.0), &m, &w);
        assert_eq!(r.lines, vec!["Hello World"]);
        assert_eq!(r.font_size, 10.0);
        assert!(!r.truncated);
        assert!((r.offset + 1.4).abs() < 1e-9);
    }

    #[test]
    fn search_stops_at_largest_fitting_size() {
        let m = HeuristicMeasurer::default();
        let w = ThresholdWrapper {
            largest_fit: 13.0,
            tried: Mutex::new(Vec::new()),
        };
        let mut o = opts(20.0);
        o.resize = true;
        // Large box so the area heuristic keeps 20.
        let r = fit_text("abc", BoxSize::new(1000.0, 1000.0), &o, &m, &w);
        assert_eq!(r.font_size, 13.0);
        assert!((r.line_height - 13.0 * 1.4).abs() < 1e-9);
        let tried = w.tried.lock().unwrap().clone();
        assert_eq!(tried, vec![20.0, 19.0, 18.0, 17.0, 16.0, 15.0, 14.0, 13.0]);
    }

    #[test]
    fn exhausting_floor_yields_no_lines() {
        let m = HeuristicMeasurer::default();
        let w = ThresholdWrapper {
            largest_fit: 2.0,
            tried: Mutex::new(Vec::new()),
        };
        let mut o = opts(12.0);
        o.resize = true;
        let r = fit_text("abc", BoxSize::new(1000.0, 1000.0), &o, &m, &w);
        assert!(r.is_empty());
        assert_eq!(w.tried.lock().unwrap().len(), 5); // 12, 11, 10, 9, 8
    }

    #[test]
    fn floor_with_ellipsis_truncates_at_min() {
        let m = HeuristicMeasurer::default();
        let w = ThresholdWrapper {
            largest_fit: 2.0,
            tried: Mutex::new(Vec::new()),
        };
        let mut o = opts(12.0);
        o.resize = true;
        o.ellipsis_at_floor = true;
        let r = fit_text("abc.", BoxSize::new(1000.0, 1000.0), &o, &m, &w);
        assert_eq!(r.font_size, 8.0);
        assert_eq!(r.lines, vec!["abc…"]);
        assert!(r.truncated);
    }

    #[test]
    fn size_above_max_is_clamped() {
        let m = HeuristicMeasurer::default();
        let w = ThresholdWrapper {
            largest_fit: 100.0,
            tried: Mutex::new(Vec::new()),
        };
        let mut o = opts(40.0);
        o.bounds = FontBounds::new(8.0, 24.0);
        let r = fit_text("abc", BoxSize::new(1000.0, 1000.0), &o, &m, &w);
        assert_eq!(r.font_size, 24.0);
    }

    #[test]
    fn fixed_size_truncation_applies_ellipsis() {
        let m = HeuristicMeasurer::default();
        let w = GreedyWrapper::new(m);
        // 6px per char; height 30 allows two 14px lines.
        let r = fit_text("aa bb cc dd", BoxSize::new(15.0, 30.0), &opts(10.0), &m, &w);
        assert_eq!(r.lines, vec!["aa", "bb…"]);
        assert!(r.truncated);
        assert_eq!(r.font_size, 10.0);
        assert_eq!(r.widths.len(), 2);
    }

    #[test]
    fn small_box_yields_no_lines() {
        let m = HeuristicMeasurer::default();
        let w = GreedyWrapper::new(m);
        let r = fit_text("Hello", BoxSize::new(200.0, 10.0), &opts(10.0), &m, &w);
        assert!(r.is_empty());
        let r = fit_text("Hello", BoxSize::new(6.0, 200.0), &opts(10.0), &m, &w);
        assert!(r.is_empty());
    }

    #[test]
    fn bottom_alignment_uses_final_line_count() {
        let m = HeuristicMeasurer::default();
        let w = GreedyWrapper::new(m);
        let mut o = opts(10.0);
        o.vertical_align = VerticalAlign::Bottom;
        let r = fit_text("Hello World", BoxSize::new(50.0, 100.0), &o, &m, &w);
        assert_eq!(r.line_count(), 2);
        assert!((r.offset + 1.4 + 28.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn resizing_can_grow_only_up_to_the_estimate() {
        let m = HeuristicMeasurer::default();
        let w = GreedyWrapper::new(m);
        let mut o = opts(10.0);
        o.resize = true;
        let r = fit_text("Hi", BoxSize::new(200.0, 200.0), &o, &m, &w);
        // The search only shrinks; a small start stays put.
        assert_eq!(r.font_size, 10.0);
        assert_eq!(r.lines, vec!["Hi"]);
    }

    #[test]
    fn resizing_precondition_checks_one_line_at_minimum_size() {
        let m = HeuristicMeasurer::default();
        let w = GreedyWrapper::new(m);
        let mut o = opts(10.0);
        o.resize = true;
        // One line at the 8px minimum is 11.2px tall.
        assert!(!can_hold_a_line(BoxSize::new(200.0, 11.0), &o));
        let r = fit_text("Hi", BoxSize::new(200.0, 11.0), &o, &m, &w);
        assert!(r.is_empty());

        // Shorter than the 14px line at 10px, but taller than one line at 8px.
        assert!(can_hold_a_line(BoxSize::new(200.0, 12.0), &o));
        let r = fit_text("Hi", BoxSize::new(200.0, 12.0), &o, &m, &w);
        assert_eq!(r.lines, vec!["Hi"]);
        assert_eq!(r.font_size, 8.0);

        o.resize = false;
        assert!(!can_hold_a_line(BoxSize::new(200.0, 12.0), &o));
    }

    #[test]
    fn huge_sizes_are_searched_from_the_cap_and_terminate() {
        let m = HeuristicMeasurer::default();
        let w = ThresholdWrapper {
            largest_fit: 2.0,
            tried: Mutex::new(Vec::new()),
        };
        let mut o = opts(1e17);
        o.resize = true;
        o.bounds = FontBounds::new(8.0, 1e17);
        let r = fit_text("a", BoxSize::new(1e18, 1e18), &o, &m, &w);
        assert!(r.is_empty());
        let tried = w.tried.lock().unwrap().clone();
        assert_eq!(tried.first(), Some(&MAX_FONT_SIZE));
        assert_eq!(tried.last(), Some(&8.0));
        assert_eq!(tried.len(), (MAX_FONT_SIZE - 8.0) as usize + 1);
    }

    #[test]
    fn zero_max_lines_at_huge_size_yields_no_lines() {
        let m = HeuristicMeasurer::default();
        let w = GreedyWrapper::new(m).max_lines(Some(0));
        let mut o = opts(1e17);
        o.resize = true;
        o.bounds = FontBounds::new(8.0, 1e17);
        let r = fit_text("a", BoxSize::new(1e18, 1e18), &o, &m, &w);
        assert!(r.is_empty());
        assert!(!r.truncated);
    }
}
