//! Greedy line wrapping into a pixel-width/height constraint.

use super::measure::Measure;
use super::split::split_spans;
use crate::models::{Style, WrapResult};

/// Line-wrapping primitive consumed by the fit orchestrator.
pub trait Wrap: Send + Sync {
    fn wrap(&self, text: &str, style: &Style, width: f64, height: f64, overflow: bool) -> WrapResult;
}

/// Greedy wrapper: packs units left to right, starting a new line when the
/// next unit would exceed `width` or the text contains a newline.
///
/// A unit is never split. When the first unit is too wide (and overflow is
/// off), or the next line would not fit vertically, the result is truncated.
#[derive(Debug, Clone)]
pub struct GreedyWrapper<M> {
    measurer: M,
    max_lines: Option<usize>,
}

impl<M: Measure> GreedyWrapper<M> {
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            max_lines: None,
        }
    }

    /// Hard cap on the number of lines regardless of height.
    pub fn max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }
}

impl<M: Measure> Wrap for GreedyWrapper<M> {
    fn wrap(&self, text: &str, style: &Style, width: f64, height: f64, overflow: bool) -> WrapResult {
        let spans = split_spans(text);
        let units: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        let sizes = self.measurer.measure(&units, style);
        let space_w = self.measurer.measure_one(" ", style);
        let max_lines = self.max_lines.unwrap_or(usize::MAX);

        let mut lines: Vec<String> = Vec::new();
        let mut line_w = 0.0;
        let mut truncated = false;
        let mut after_newline = false;

        for (i, &(start, end)) in spans.iter().enumerate() {
            let unit_w = sizes.get(i).copied().unwrap_or(0.0);
            // Whitespace between this unit and the next one (or end of text).
            let gap_end = spans.get(i + 1).map(|&(s, _)| s).unwrap_or(text.len());
            let gap = &text[end..gap_end];
            let piece = &text[start..gap_end];

            if lines.is_empty() {
                if unit_w > width && !overflow {
                    truncated = true;
                    break;
                }
                if style.line_height > height || max_lines == 0 {
                    truncated = true;
                    break;
                }
                lines.push(piece.to_string());
            } else if after_newline || line_w + unit_w > width {
                if let Some(last) = lines.last_mut() {
                    let trimmed_len = last.trim_end().len();
                    last.truncate(trimmed_len);
                }
                let next_count = lines.len() + 1;
                if style.line_height * next_count as f64 > height
                    || next_count > max_lines
                    || (unit_w > width && !overflow)
                {
                    truncated = true;
                    break;
                }
                line_w = 0.0;
                lines.push(piece.to_string());
            } else if let Some(last) = lines.last_mut() {
                last.push_str(piece);
            }

            line_w += unit_w;
            line_w += gap.chars().filter(|c| *c != '\n').count() as f64 * space_w;
            after_newline = gap.contains('\n');
        }

        // Newlines inside a line's trailing gap are not rendered.
        for line in lines.iter_mut() {
            if line.contains('\n') || line.contains('\r') {
                *line = line.replace(['\n', '\r'], " ");
            }
        }
        lines.retain(|l| !l.trim().is_empty());

        let refs: Vec<&str> = lines.iter().map(|l| l.trim_end()).collect();
        let widths = self.measurer.measure(&refs, style);
        WrapResult {
            lines,
            widths,
            truncated,
        }
    }
}
