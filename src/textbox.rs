//! Per-item configuration surface and layout passes.
//!
//! Every option is an [`Accessor`]: either a constant or a function of the
//! item and its index. Accessors are resolved once per item, then the item is
//! fitted with [`fit_text`]. Items share nothing mutable, so a pass can run
//! sequentially ([`TextBox::layout`]) or in parallel ([`TextBox::layout_par`]).

use crate::fit::{Ellipsis, FitConstants, FitOptions, fit_text, position};
use crate::models::{
    BoxSize, FontBounds, LabelDatum, Style, TextAnchor, TextLayout, VerticalAlign,
};
use crate::text::{GreedyWrapper, HeuristicMeasurer, Measure, Wrap};
use std::fmt;
use std::sync::Arc;

/// A constant or a per-item function `(datum, index) -> value`.
pub enum Accessor<D, T> {
    Const(T),
    Func(Arc<dyn Fn(&D, usize) -> T + Send + Sync>),
}

impl<D, T: Clone> Accessor<D, T> {
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&D, usize) -> T + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }

    pub fn resolve(&self, d: &D, i: usize) -> T {
        match self {
            Self::Const(v) => v.clone(),
            Self::Func(f) => f(d, i),
        }
    }
}

impl<D, T> From<T> for Accessor<D, T> {
    fn from(v: T) -> Self {
        Self::Const(v)
    }
}

impl<D, T: Clone> Clone for Accessor<D, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Const(v) => Self::Const(v.clone()),
            Self::Func(f) => Self::Func(Arc::clone(f)),
        }
    }
}

impl<D, T: fmt::Debug> fmt::Debug for Accessor<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(v) => f.debug_tuple("Const").field(v).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Options of one item after every accessor has been resolved.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    pub id: String,
    pub text: String,
    pub bounds: BoxSize,
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
    pub text_anchor: TextAnchor,
    pub max_lines: Option<usize>,
    pub fit: FitOptions,
}

/// Fits a sequence of items into their boxes.
#[derive(Clone)]
pub struct TextBox<D> {
    id: Accessor<D, String>,
    text: Accessor<D, Option<String>>,
    x: Accessor<D, f64>,
    y: Accessor<D, f64>,
    width: Accessor<D, f64>,
    height: Accessor<D, f64>,
    rotate: Accessor<D, f64>,
    font_family: Accessor<D, String>,
    font_weight: Accessor<D, String>,
    font_size: Accessor<D, f64>,
    font_min: Accessor<D, f64>,
    font_max: Accessor<D, f64>,
    font_resize: Accessor<D, bool>,
    /// `None` means `line_height_ratio` × font size.
    line_height: Accessor<D, Option<f64>>,
    overflow: Accessor<D, bool>,
    vertical_align: Accessor<D, VerticalAlign>,
    text_anchor: Accessor<D, TextAnchor>,
    ellipsis: Accessor<D, Ellipsis>,
    ellipsis_at_floor: Accessor<D, bool>,
    max_lines: Accessor<D, Option<usize>>,
    constants: FitConstants,
    measurer: Arc<dyn Measure>,
    wrapper: Option<Arc<dyn Wrap>>,
}

impl<D> fmt::Debug for TextBox<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBox")
            .field("font_size", &self.font_size)
            .field("font_min", &self.font_min)
            .field("font_max", &self.font_max)
            .field("font_resize", &self.font_resize)
            .field("vertical_align", &self.vertical_align)
            .field("text_anchor", &self.text_anchor)
            .field("constants", &self.constants)
            .finish_non_exhaustive()
    }
}

macro_rules! accessor_setters {
    ($($(#[$doc:meta])* $name:ident: $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(mut self, value: impl Into<Accessor<D, $ty>>) -> Self {
                self.$name = value.into();
                self
            }
        )*
    };
}

impl<D> TextBox<D> {
    /// New text box reading each item's text through `text`. All other options
    /// start at their defaults: 10px `sans-serif` weight 400, bounds 8..=50,
    /// no resizing, no overflow, top/start alignment, 200×200 box at (0, 0).
    pub fn new<F>(text: F) -> Self
    where
        F: Fn(&D, usize) -> Option<String> + Send + Sync + 'static,
    {
        let bounds = FontBounds::default();
        Self {
            id: Accessor::func(|_, i| i.to_string()),
            text: Accessor::func(text),
            x: Accessor::Const(0.0),
            y: Accessor::Const(0.0),
            width: Accessor::Const(200.0),
            height: Accessor::Const(200.0),
            rotate: Accessor::Const(0.0),
            font_family: Accessor::Const("sans-serif".to_string()),
            font_weight: Accessor::Const("400".to_string()),
            font_size: Accessor::Const(10.0),
            font_min: Accessor::Const(bounds.min),
            font_max: Accessor::Const(bounds.max),
            font_resize: Accessor::Const(false),
            line_height: Accessor::Const(None),
            overflow: Accessor::Const(false),
            vertical_align: Accessor::Const(VerticalAlign::Top),
            text_anchor: Accessor::Const(TextAnchor::Start),
            ellipsis: Accessor::Const(Ellipsis::default()),
            ellipsis_at_floor: Accessor::Const(false),
            max_lines: Accessor::Const(None),
            constants: FitConstants::default(),
            measurer: Arc::new(HeuristicMeasurer::default()),
            wrapper: None,
        }
    }

    accessor_setters! {
        /// Stable identifier used by renderers to reconcile items across passes.
        id: String;
        text: Option<String>;
        x: f64;
        y: f64;
        width: f64;
        height: f64;
        /// Rotation in degrees, applied by the renderer.
        rotate: f64;
        font_family: String;
        font_weight: String;
        font_size: f64;
        font_min: f64;
        font_max: f64;
        font_resize: bool;
        /// Fixed line height; `None` derives it from the font size.
        line_height: Option<f64>;
        /// Allow single units wider than the box.
        overflow: bool;
        vertical_align: VerticalAlign;
        text_anchor: TextAnchor;
        ellipsis: Ellipsis;
        ellipsis_at_floor: bool;
        /// Forwarded to the default wrapper; ignored by a custom one.
        max_lines: Option<usize>;
    }

    pub fn constants(mut self, constants: FitConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn measurer(mut self, measurer: impl Measure + 'static) -> Self {
        self.measurer = Arc::new(measurer);
        self
    }

    /// Replace the default [`GreedyWrapper`].
    pub fn wrapper(mut self, wrapper: impl Wrap + 'static) -> Self {
        self.wrapper = Some(Arc::new(wrapper));
        self
    }

    /// Resolve every accessor for one item. `None` when the item has no text.
    pub fn resolve(&self, d: &D, i: usize) -> Option<ResolvedItem> {
        let text = self.text.resolve(d, i)?;
        let font_size = self.font_size.resolve(d, i);
        let line_height = self
            .line_height
            .resolve(d, i)
            .unwrap_or(font_size * self.constants.line_height_ratio);
        let bounds = FontBounds::new(self.font_min.resolve(d, i), self.font_max.resolve(d, i));
        let id = self.id.resolve(d, i);
        if bounds.min > bounds.max {
            log::warn!(
                "item {id}: font min {} exceeds font max {}; clamping to {}",
                bounds.min,
                bounds.max,
                bounds.max
            );
        }

        let style = Style {
            font_family: self.font_family.resolve(d, i),
            font_weight: self.font_weight.resolve(d, i),
            font_size,
            line_height,
        };

        Some(ResolvedItem {
            id,
            text,
            bounds: BoxSize::new(self.width.resolve(d, i), self.height.resolve(d, i)),
            x: self.x.resolve(d, i),
            y: self.y.resolve(d, i),
            rotate: self.rotate.resolve(d, i),
            text_anchor: self.text_anchor.resolve(d, i),
            max_lines: self.max_lines.resolve(d, i),
            fit: FitOptions {
                style,
                bounds: bounds.normalized(),
                resize: self.font_resize.resolve(d, i),
                overflow: self.overflow.resolve(d, i),
                vertical_align: self.vertical_align.resolve(d, i),
                ellipsis: self.ellipsis.resolve(d, i),
                ellipsis_at_floor: self.ellipsis_at_floor.resolve(d, i),
                constants: self.constants,
            },
        })
    }

    /// Fit one item. `None` when the item has no text.
    pub fn layout_item(&self, d: &D, i: usize) -> Option<TextLayout> {
        let item = self.resolve(d, i)?;
        let measurer: &dyn Measure = self.measurer.as_ref();
        let fit = match &self.wrapper {
            Some(w) => fit_text(&item.text, item.bounds, &item.fit, measurer, w.as_ref()),
            None => {
                let w = GreedyWrapper::new(measurer).max_lines(item.max_lines);
                fit_text(&item.text, item.bounds, &item.fit, measurer, &w)
            }
        };
        log::debug!(
            "item {}: {} line(s) at {}px{}",
            item.id,
            fit.line_count(),
            fit.font_size,
            if fit.truncated { " (truncated)" } else { "" }
        );

        Some(TextLayout {
            y: item.y + fit.offset,
            anchor_x: position::horizontal_pivot(item.text_anchor, item.bounds.width),
            id: item.id,
            index: i,
            font_family: item.fit.style.font_family,
            font_weight: item.fit.style.font_weight,
            width: item.bounds.width,
            height: item.bounds.height,
            x: item.x,
            text_anchor: item.text_anchor,
            vertical_align: item.fit.vertical_align,
            rotate: item.rotate,
            fit,
        })
    }

    /// Lay out every item in order. Items without text are skipped.
    pub fn layout(&self, data: &[D]) -> Vec<TextLayout> {
        data.iter()
            .enumerate()
            .filter_map(|(i, d)| self.layout_item(d, i))
            .collect()
    }

    /// Same result as [`TextBox::layout`], computed on the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn layout_par(&self, data: &[D]) -> Vec<TextLayout>
    where
        D: Sync,
    {
        use rayon::prelude::*;

        data.par_iter()
            .enumerate()
            .filter_map(|(i, d)| self.layout_item(d, i))
            .collect()
    }
}

impl TextBox<LabelDatum> {
    /// Text box for [`LabelDatum`] items: each present field overrides the
    /// value configured on `base` (constants only; per-item functions on
    /// `base` are evaluated as fallbacks).
    pub fn for_labels(base: TextBox<LabelDatum>) -> Self {
        let TextBox {
            id,
            x,
            y,
            width,
            height,
            rotate,
            font_family,
            font_weight,
            font_size,
            font_min,
            font_max,
            font_resize,
            line_height,
            overflow,
            vertical_align,
            text_anchor,
            max_lines,
            ..
        } = base.clone();

        fn field<T, F>(fallback: Accessor<LabelDatum, T>, get: F) -> Accessor<LabelDatum, T>
        where
            T: Clone + Send + Sync + 'static,
            F: Fn(&LabelDatum) -> Option<T> + Send + Sync + 'static,
        {
            Accessor::func(move |d: &LabelDatum, i| get(d).unwrap_or_else(|| fallback.resolve(d, i)))
        }

        base.text(Accessor::func(|d: &LabelDatum, _| d.text.clone()))
            .id(field(id, |d| d.id.clone()))
            .x(field(x, |d| d.x))
            .y(field(y, |d| d.y))
            .width(field(width, |d| d.width))
            .height(field(height, |d| d.height))
            .rotate(field(rotate, |d| d.rotate))
            .font_family(field(font_family, |d| d.font_family.clone()))
            .font_weight(field(font_weight, |d| d.font_weight.clone()))
            .font_size(field(font_size, |d| d.font_size))
            .font_min(field(font_min, |d| d.font_min))
            .font_max(field(font_max, |d| d.font_max))
            .font_resize(field(font_resize, |d| d.font_resize))
            .line_height(field(line_height, |d| d.line_height.map(Some)))
            .overflow(field(overflow, |d| d.overflow))
            .vertical_align(field(vertical_align, |d| d.vertical_align))
            .text_anchor(field(text_anchor, |d| d.text_anchor))
            .max_lines(field(max_lines, |d| d.max_lines.map(Some)))
    }
}

impl Default for TextBox<LabelDatum> {
    fn default() -> Self {
        Self::for_labels(TextBox::new(|d: &LabelDatum, _| d.text.clone()))
    }
}
