//! Cascading style resolution for template elements.
//!
//! Layers apply in a fixed order, later wins: built-in defaults, the
//! template's `defaultStyle`, the element's named style, then the element's
//! inline `styleOverrides`. Each property resolves on its own.

use crate::dimension::{Margins, normalize_padding};
use crate::font::{FontStyle, FontWeight};
use crate::list::ListStyleType;
use crate::properties::StyleProperties;
use crate::text::{TextAlign, TextDecoration, VerticalAlign};
use folio_types::Color;
use std::collections::HashMap;

/// Anything that can name a style and carry inline overrides.
pub trait Styled {
    fn style_name(&self) -> Option<&str>;
    fn style_overrides(&self) -> Option<&StyleProperties>;
}

/// A fully populated style. No field is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: Color,
    pub background_color: Option<Color>,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    /// Multiplier applied to `font_size`.
    pub line_height: f32,
    pub text_decoration: TextDecoration,
    pub border_width: f32,
    pub border_color: Color,
    pub padding: Margins,
    pub opacity: f32,
    pub list_style_type: ListStyleType,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: 12.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            color: Color::BLACK,
            background_color: None,
            text_align: TextAlign::Left,
            vertical_align: VerticalAlign::Top,
            line_height: 1.2,
            text_decoration: TextDecoration::None,
            border_width: 0.0,
            border_color: Color::BLACK,
            padding: Margins::default(),
            opacity: 1.0,
            list_style_type: ListStyleType::Disc,
        }
    }
}

impl ResolvedStyle {
    /// Line advance in points.
    pub fn line_advance(&self) -> f32 {
        self.font_size * self.line_height
    }

    fn apply(mut self, merged: &StyleProperties) -> Self {
        if let Some(v) = &merged.font_family {
            self.font_family = v.clone();
        }
        if let Some(v) = merged.font_size {
            self.font_size = v;
        }
        if let Some(v) = merged.font_weight {
            self.font_weight = v;
        }
        if let Some(v) = merged.font_style {
            self.font_style = v;
        }
        if let Some(v) = &merged.color {
            self.color = v.clone();
        }
        if let Some(v) = &merged.background_color {
            self.background_color = Some(v.clone());
        }
        if let Some(v) = merged.text_align {
            self.text_align = v;
        }
        if let Some(v) = merged.vertical_align {
            self.vertical_align = v;
        }
        if let Some(v) = merged.line_height {
            self.line_height = v;
        }
        if let Some(v) = merged.text_decoration {
            self.text_decoration = v;
        }
        if let Some(v) = merged.border_width {
            self.border_width = v.max(0.0);
        }
        if let Some(v) = &merged.border_color {
            self.border_color = v.clone();
        }
        if merged.padding.is_some() {
            self.padding = normalize_padding(merged.padding.as_ref());
        }
        if let Some(v) = merged.opacity {
            self.opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = merged.list_style_type {
            self.list_style_type = v;
        }
        self
    }
}

/// Resolves the effective style of `element`.
///
/// An unknown style name resolves to an empty layer rather than an error.
pub fn resolve_style<S: Styled + ?Sized>(
    element: &S,
    named_styles: &HashMap<String, StyleProperties>,
    default_style: Option<&StyleProperties>,
) -> ResolvedStyle {
    let mut merged = StyleProperties::default();
    if let Some(default_style) = default_style {
        merged.merge(default_style);
    }
    if let Some(name) = element.style_name() {
        match named_styles.get(name) {
            Some(named) => merged.merge(named),
            None => log::debug!("Style '{}' is not defined; ignoring", name),
        }
    }
    if let Some(overrides) = element.style_overrides() {
        merged.merge(overrides);
    }
    ResolvedStyle::default().apply(&merged)
}
