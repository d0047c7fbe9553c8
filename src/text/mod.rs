//! Text primitives: measurement, word splitting, and line wrapping.

pub mod measure;
pub mod split;
pub mod wrap;

pub use measure::{GlyphMeasurer, HeuristicMeasurer, Measure};
pub use split::split;
pub use wrap::{GreedyWrapper, Wrap};

/// Remove trailing whitespace before a line is drawn.
pub fn trim_trailing(line: &str) -> &str {
    line.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_only_the_end() {
        assert_eq!(trim_trailing("  a b \t\n"), "  a b");
        assert_eq!(trim_trailing(""), "");
    }
}
