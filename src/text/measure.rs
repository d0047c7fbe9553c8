//! Text measurement: pixel width of text units for a given style.

use crate::error::ConfigError;
use crate::models::Style;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use unicode_width::UnicodeWidthStr;

/// Measurement oracle. Implementations must be pure for a given style so that
/// items can be measured from several threads at once.
pub trait Measure: Send + Sync {
    /// Pixel width per unit, same order as `units`.
    fn measure(&self, units: &[&str], style: &Style) -> Vec<f64>;

    fn measure_one(&self, unit: &str, style: &Style) -> f64 {
        self.measure(&[unit], style).first().copied().unwrap_or(0.0)
    }
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure(&self, units: &[&str], style: &Style) -> Vec<f64> {
        (**self).measure(units, style)
    }
}

impl<M: Measure + ?Sized> Measure for Box<M> {
    fn measure(&self, units: &[&str], style: &Style) -> Vec<f64> {
        (**self).measure(units, style)
    }
}

impl<M: Measure + ?Sized> Measure for std::sync::Arc<M> {
    fn measure(&self, units: &[&str], style: &Style) -> Vec<f64> {
        (**self).measure(units, style)
    }
}

/// Widening applied to bold weights by the heuristic.
const BOLD_FACTOR: f64 = 1.1;

/// Heuristic: estimate pixel width from terminal display cells (wide CJK glyphs count twice).
/// No font files needed; good enough for sizing decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicMeasurer {
    /// Average glyph advance as a fraction of the font size.
    pub em_ratio: f64,
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self { em_ratio: 0.60 }
    }
}

impl HeuristicMeasurer {
    pub fn width(&self, text: &str, style: &Style) -> f64 {
        let cells = UnicodeWidthStr::width(text) as f64;
        let w = cells * style.font_size * self.em_ratio;
        if style.is_bold() { w * BOLD_FACTOR } else { w }
    }
}

impl Measure for HeuristicMeasurer {
    fn measure(&self, units: &[&str], style: &Style) -> Vec<f64> {
        units.iter().map(|u| self.width(u, style)).collect()
    }
}

/// Measures with real glyph advances through plotters' `ab_glyph` font path.
///
/// `ab_glyph` does not discover OS fonts, so the family used by the styles
/// must be registered first via [`GlyphMeasurer::register_font`]. Any font
/// error falls back to [`HeuristicMeasurer`] (warned about once).
#[derive(Debug, Default)]
pub struct GlyphMeasurer {
    fallback: HeuristicMeasurer,
    warned: AtomicBool,
}

impl GlyphMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register TTF/OTF bytes under `family`. The bytes live for the rest of the process.
    pub fn register_font(family: &str, bytes: Vec<u8>) -> Result<(), ConfigError> {
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        let invalid = |_| ConfigError::Font(format!("{family}: invalid font data"));
        plotters::style::register_font(family, FontStyle::Normal, bytes).map_err(invalid)?;
        // Bold falls back to the same face; weight is approximated by the heuristic factor.
        plotters::style::register_font(family, FontStyle::Bold, bytes).map_err(invalid)
    }

    fn glyph_width(&self, text: &str, style: &Style) -> Option<f64> {
        let font_style = if style.is_bold() {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        let desc = FontDesc::new(
            FontFamily::Name(&style.font_family),
            style.font_size,
            font_style,
        );
        match desc.box_size(text) {
            Ok((w, _)) => Some(w as f64),
            Err(e) => {
                if !self.warned.swap(true, Ordering::Relaxed) {
                    log::warn!(
                        "glyph measurement failed for family {:?} ({e:?}); using heuristic widths",
                        style.font_family
                    );
                }
                None
            }
        }
    }
}

impl Measure for GlyphMeasurer {
    fn measure(&self, units: &[&str], style: &Style) -> Vec<f64> {
        units
            .iter()
            .map(|u| {
                if u.is_empty() {
                    return 0.0;
                }
                self.glyph_width(u, style)
                    .unwrap_or_else(|| self.fallback.width(u, style))
            })
            .collect()
    }
}
