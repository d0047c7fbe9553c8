//! What replaces content that was cut off.

use super::types::Ellipsis;

/// The ellipsis glyph appended by [`default_ellipsis`].
pub const ELLIPSIS: &str = "\u{2026}";

/// Drop trailing whitespace and at most one trailing `.` or `,`, then append `…`.
pub fn default_ellipsis(line: &str) -> String {
    let trimmed = line.trim_end();
    let stem = trimmed
        .strip_suffix('.')
        .or_else(|| trimmed.strip_suffix(','))
        .unwrap_or(trimmed);
    format!("{stem}{ELLIPSIS}")
}

/// Mark truncated output.
///
/// With no accepted lines the result is a single bare marker
/// (`ellipsis("")`); otherwise only the last line is transformed.
pub fn apply_ellipsis(mut lines: Vec<String>, ellipsis: &Ellipsis) -> Vec<String> {
    match lines.last_mut() {
        None => vec![ellipsis.apply("")],
        Some(last) => {
            *last = ellipsis.apply(last);
            lines
        }
    }
}
