//! labelfit_rs
//!
//! A lightweight Rust library for fitting label text into fixed-size boxes,
//! as needed by chart and diagram renderers. Pairs with the `labelfit` CLI.
//!
//! ### Features
//! - Optional font resizing within `[font_min, font_max]`, seeded by an area heuristic
//! - Greedy word wrapping against a pixel width and height
//! - Ellipsis truncation when text cannot fit at a fixed size
//! - Vertical alignment (`top`, `middle`, `bottom`) and text-anchor pivots
//! - Per-item options: every setting is a constant or a function of the item
//! - Save layouts as CSV or JSON for an external renderer
//!
//! ### Example
//! ```
//! use labelfit_rs::{LabelDatum, TextBox};
//!
//! let items = vec![LabelDatum {
//!     id: Some("gdp".into()),
//!     text: Some("GDP per capita (current US$)".into()),
//!     width: Some(120.0),
//!     height: Some(60.0),
//!     font_resize: Some(true),
//!     ..LabelDatum::default()
//! }];
//! let layouts = TextBox::default().layout(&items);
//! assert_eq!(layouts.len(), 1);
//! assert!(!layouts[0].fit.lines.is_empty());
//! let summary = labelfit_rs::stats::summarize(&layouts);
//! println!("{:#?}", summary);
//! ```

pub mod error;
pub mod fit;
pub mod models;
pub mod stats;
pub mod storage;
pub mod text;
pub mod textbox;

pub use error::ConfigError;
pub use fit::{Ellipsis, FitConstants, FitOptions, fit_text};
pub use models::{
    BoxSize, FitResult, FontBounds, LabelDatum, MAX_FONT_SIZE, Style, TextAnchor, TextLayout,
    VerticalAlign, WrapResult,
};
pub use textbox::{Accessor, TextBox};
