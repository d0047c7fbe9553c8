//! Public types and constants for the fitting core.

use crate::models::{FontBounds, Style, VerticalAlign};
use std::fmt;
use std::sync::Arc;

use super::ellipsis::default_ellipsis;

/// Empirically tuned heuristic constants. Layouts depend on the exact values,
/// so change them only together with regression expectations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConstants {
    /// Base of the area correction factor `area_base + (w / h) * area_aspect_weight`.
    pub area_base: f64,
    pub area_aspect_weight: f64,
    /// Largest share of the box height a font size may claim.
    pub height_ceiling: f64,
    /// Line height as a multiple of font size while resizing.
    pub line_height_ratio: f64,
    /// Baseline compensation as a multiple of line height (subtracted from the offset).
    pub baseline_shift: f64,
}

pub const DEFAULT_FIT_CONSTANTS: FitConstants = FitConstants {
    area_base: 1.165,
    area_aspect_weight: 0.1,
    height_ceiling: 0.8,
    line_height_ratio: 1.4,
    baseline_shift: 0.1,
};

impl Default for FitConstants {
    fn default() -> Self {
        DEFAULT_FIT_CONSTANTS
    }
}

/// Maps a line to its ellipsis-suffixed form.
#[derive(Clone)]
pub struct Ellipsis(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Ellipsis {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, line: &str) -> String {
        (self.0)(line)
    }
}

impl Default for Ellipsis {
    fn default() -> Self {
        Self::new(default_ellipsis)
    }
}

impl fmt::Debug for Ellipsis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ellipsis(..)")
    }
}

/// Everything the orchestrator needs for one item, resolved up front.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Starting style; its font size is the fixed size when not resizing.
    pub style: Style,
    pub bounds: FontBounds,
    pub resize: bool,
    pub overflow: bool,
    pub vertical_align: VerticalAlign,
    pub ellipsis: Ellipsis,
    /// When the search exhausts the floor, wrap at the minimum size and
    /// truncate with an ellipsis instead of yielding zero lines.
    pub ellipsis_at_floor: bool,
    pub constants: FitConstants,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            bounds: FontBounds::default(),
            resize: false,
            overflow: false,
            vertical_align: VerticalAlign::Top,
            ellipsis: Ellipsis::default(),
            ellipsis_at_floor: false,
            constants: FitConstants::default(),
        }
    }
}
