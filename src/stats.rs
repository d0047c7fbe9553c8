use crate::models::TextLayout;
use serde::{Deserialize, Serialize};

/// Summary of one layout pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Items with text (laid out or omitted).
    pub count: usize,
    /// Items with at least one line.
    pub shown: usize,
    /// Items that fit nothing (zero lines).
    pub omitted: usize,
    /// Items whose last line carries an ellipsis.
    pub truncated: usize,
    pub total_lines: usize,
    pub min_font: Option<f64>,
    pub max_font: Option<f64>,
    pub mean_font: Option<f64>,
}

/// Summarize a pass. Font statistics only cover shown items.
pub fn summarize(layouts: &[TextLayout]) -> Summary {
    let mut sizes: Vec<f64> = Vec::new();
    let mut out = Summary {
        count: layouts.len(),
        ..Summary::default()
    };
    for l in layouts {
        if l.fit.is_empty() {
            out.omitted += 1;
            continue;
        }
        out.shown += 1;
        out.total_lines += l.fit.line_count();
        if l.fit.truncated {
            out.truncated += 1;
        }
        sizes.push(l.fit.font_size);
    }

    sizes.sort_by(|a, b| a.total_cmp(b));
    out.min_font = sizes.first().copied();
    out.max_font = sizes.last().copied();
    out.mean_font = if sizes.is_empty() {
        None
    } else {
        Some(sizes.iter().sum::<f64>() / sizes.len() as f64)
    };
    out
}
