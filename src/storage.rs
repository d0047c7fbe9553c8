use crate::error::ConfigError;
use crate::models::{LabelDatum, MAX_FONT_SIZE, TextLayout};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read label items from a JSON array file.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Vec<LabelDatum>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let items = parse_labels(BufReader::new(f))
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(items)
}

/// Parse and validate label items. Sizes must be finite and non-negative, and
/// font sizes at most [`MAX_FONT_SIZE`].
pub fn parse_labels<R: std::io::Read>(reader: R) -> Result<Vec<LabelDatum>, ConfigError> {
    let items: Vec<LabelDatum> = serde_json::from_reader(reader)?;
    for (index, d) in items.iter().enumerate() {
        let sizes = [
            ("width", d.width),
            ("height", d.height),
            ("font_size", d.font_size),
            ("font_min", d.font_min),
            ("font_max", d.font_max),
            ("line_height", d.line_height),
        ];
        for (name, v) in sizes {
            if let Some(v) = v
                && !(v.is_finite() && v >= 0.0)
            {
                return Err(ConfigError::InvalidItem {
                    index,
                    message: format!("{name} must be a non-negative number, got {v}"),
                });
            }
        }
        let fonts = [
            ("font_size", d.font_size),
            ("font_min", d.font_min),
            ("font_max", d.font_max),
        ];
        for (name, v) in fonts {
            if let Some(v) = v
                && v > MAX_FONT_SIZE
            {
                return Err(ConfigError::InvalidItem {
                    index,
                    message: format!("{name} must be at most {MAX_FONT_SIZE}px, got {v}"),
                });
            }
        }
    }
    Ok(items)
}

/// One CSV record per layout. Field names become the header.
#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    index: usize,
    font_family: &'a str,
    font_weight: &'a str,
    font_size: f64,
    line_height: f64,
    line_count: usize,
    truncated: bool,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    anchor_x: f64,
    text_anchor: String,
    vertical_align: String,
    rotate: f64,
    /// Rendered lines joined with `\n`.
    lines: String,
}

impl<'a> From<&'a TextLayout> for CsvRow<'a> {
    fn from(l: &'a TextLayout) -> Self {
        Self {
            id: &l.id,
            index: l.index,
            font_family: &l.font_family,
            font_weight: &l.font_weight,
            font_size: l.fit.font_size,
            line_height: l.fit.line_height,
            line_count: l.fit.line_count(),
            truncated: l.fit.truncated,
            x: l.x,
            y: l.y,
            width: l.width,
            height: l.height,
            anchor_x: l.anchor_x,
            text_anchor: l.text_anchor.to_string(),
            vertical_align: l.vertical_align.to_string(),
            rotate: l.rotate,
            lines: l.rendered_lines().join("\n"),
        }
    }
}

/// Save layouts as CSV with header. Lines are joined with `\n` inside one field.
pub fn save_csv<P: AsRef<Path>>(layouts: &[TextLayout], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for l in layouts {
        wtr.serialize(CsvRow::from(l))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save layouts as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(layouts: &[TextLayout], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(layouts)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
