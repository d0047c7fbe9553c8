use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Immutable font snapshot used for one measurement or wrap pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub font_family: String,
    /// CSS-like weight, e.g. `"400"`, `"bold"`.
    pub font_weight: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Line height in pixels (conventionally 1.4 × font size).
    pub line_height: f64,
}

impl Style {
    pub fn new(font_family: impl Into<String>, font_weight: impl Into<String>, font_size: f64) -> Self {
        Self {
            font_family: font_family.into(),
            font_weight: font_weight.into(),
            font_size,
            line_height: font_size * 1.4,
        }
    }

    /// Same family and weight at a different size/line height.
    pub fn with_size(&self, font_size: f64, line_height: f64) -> Self {
        Self {
            font_family: self.font_family.clone(),
            font_weight: self.font_weight.clone(),
            font_size,
            line_height,
        }
    }

    /// True for `bold`, `bolder`, and numeric weights of 600 and up.
    pub fn is_bold(&self) -> bool {
        let w = self.font_weight.trim().to_ascii_lowercase();
        match w.as_str() {
            "bold" | "bolder" => true,
            other => other.parse::<u32>().map(|n| n >= 600).unwrap_or(false),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new("sans-serif", "400", 10.0)
    }
}

/// Pixel box available for one text item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Largest font size, in pixels, any fit will try.
pub const MAX_FONT_SIZE: f64 = 4096.0;

/// Allowed font size range when resizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontBounds {
    pub min: f64,
    pub max: f64,
}

impl FontBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns bounds with `min <= max <= MAX_FONT_SIZE`. An inverted range
    /// collapses onto `max`.
    pub fn normalized(self) -> Self {
        let max = if self.max > MAX_FONT_SIZE {
            MAX_FONT_SIZE
        } else {
            self.max
        };
        let min = if self.min > max { max } else { self.min };
        Self { min, max }
    }
}

impl Default for FontBounds {
    fn default() -> Self {
        Self { min: 8.0, max: 50.0 }
    }
}

/// Vertical alignment of the text block inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl FromStr for VerticalAlign {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            other => Err(ConfigError::InvalidOption {
                option: "vertical-align",
                value: other.to_string(),
                expected: "top, middle, bottom",
            }),
        }
    }
}

impl TryFrom<String> for VerticalAlign {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        })
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl FromStr for TextAnchor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "middle" => Ok(Self::Middle),
            "end" => Ok(Self::End),
            other => Err(ConfigError::InvalidOption {
                option: "text-anchor",
                value: other.to_string(),
                expected: "start, middle, end",
            }),
        }
    }
}

impl TryFrom<String> for TextAnchor {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        })
    }
}

/// Output of the line wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapResult {
    /// Wrapped lines, empty strings removed.
    pub lines: Vec<String>,
    /// Measured width of each line in `lines`.
    pub widths: Vec<f64>,
    /// Not every unit made it into `lines`.
    pub truncated: bool,
}

/// Accepted fit for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub font_size: f64,
    pub line_height: f64,
    /// Rendered lines after the ellipsis policy. Empty means "omit this item".
    pub lines: Vec<String>,
    /// Measured width of each line in `lines`.
    pub widths: Vec<f64>,
    /// Vertical offset from the item's anchor, baseline correction included.
    pub offset: f64,
    /// Content was cut and the ellipsis policy applied.
    pub truncated: bool,
}

impl FitResult {
    /// A result with nothing to draw.
    pub fn empty(font_size: f64, line_height: f64) -> Self {
        Self {
            font_size,
            line_height,
            lines: Vec::new(),
            widths: Vec::new(),
            offset: 0.0,
            truncated: false,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total height of the rendered block.
    pub fn text_height(&self) -> f64 {
        self.line_count() as f64 * self.line_height
    }
}

/// Finished per-item record handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayout {
    /// Caller-supplied stable identifier.
    pub id: String,
    /// Position of the item in the input sequence.
    pub index: usize,
    pub font_family: String,
    pub font_weight: String,
    pub width: f64,
    pub height: f64,
    /// Left edge of the box.
    pub x: f64,
    /// Item anchor plus the vertical offset.
    pub y: f64,
    /// Horizontal pivot inside the box for the text anchor.
    pub anchor_x: f64,
    pub text_anchor: TextAnchor,
    pub vertical_align: VerticalAlign,
    /// Rotation in degrees around the box center.
    pub rotate: f64,
    #[serde(flatten)]
    pub fit: FitResult,
}

impl TextLayout {
    /// Lines with trailing whitespace removed, ready to draw.
    pub fn rendered_lines(&self) -> Vec<String> {
        self.fit
            .lines
            .iter()
            .map(|l| crate::text::trim_trailing(l).to_string())
            .collect()
    }
}

/// One label as read from an item file. Every field except `text` is an
/// optional per-item override of the corresponding `TextBox` option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelDatum {
    pub id: Option<String>,
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotate: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_size: Option<f64>,
    pub font_min: Option<f64>,
    pub font_max: Option<f64>,
    pub font_resize: Option<bool>,
    pub line_height: Option<f64>,
    pub overflow: Option<bool>,
    pub vertical_align: Option<VerticalAlign>,
    pub text_anchor: Option<TextAnchor>,
    pub max_lines: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_alignment_names() {
        assert_eq!("Middle".parse::<VerticalAlign>().unwrap(), VerticalAlign::Middle);
        assert_eq!(" end ".parse::<TextAnchor>().unwrap(), TextAnchor::End);
        assert!("center".parse::<VerticalAlign>().is_err());
    }

    #[test]
    fn inverted_bounds_collapse_onto_max() {
        let b = FontBounds::new(30.0, 12.0).normalized();
        assert_eq!(b, FontBounds::new(12.0, 12.0));
        let ok = FontBounds::new(8.0, 50.0).normalized();
        assert_eq!(ok, FontBounds::default());
    }

    #[test]
    fn bounds_are_capped_at_max_font_size() {
        let b = FontBounds::new(8.0, 1e17).normalized();
        assert_eq!(b, FontBounds::new(8.0, MAX_FONT_SIZE));
        let b = FontBounds::new(1e16, 1e17).normalized();
        assert_eq!(b, FontBounds::new(MAX_FONT_SIZE, MAX_FONT_SIZE));
    }

    #[test]
    fn label_datum_fields_are_optional() {
        let d: LabelDatum =
            serde_json::from_str(r#"{"text": "GDP", "vertical_align": "bottom"}"#).unwrap();
        assert_eq!(d.text.as_deref(), Some("GDP"));
        assert_eq!(d.vertical_align, Some(VerticalAlign::Bottom));
        assert!(d.width.is_none());
    }

    #[test]
    fn item_alignment_names_ignore_case() {
        let d: LabelDatum =
            serde_json::from_str(r#"{"vertical_align": "Middle", "text_anchor": " END"}"#)
                .unwrap();
        assert_eq!(d.vertical_align, Some(VerticalAlign::Middle));
        assert_eq!(d.text_anchor, Some(TextAnchor::End));
        let err = serde_json::from_str::<LabelDatum>(r#"{"vertical_align": "center"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("vertical-align"));
        // Output stays lowercase.
        assert_eq!(serde_json::to_string(&TextAnchor::Middle).unwrap(), r#""middle""#);
    }

    #[test]
    fn bold_detection() {
        let mut s = Style::default();
        assert!(!s.is_bold());
        s.font_weight = "700".into();
        assert!(s.is_bold());
        s.font_weight = "bold".into();
        assert!(s.is_bold());
    }
}
