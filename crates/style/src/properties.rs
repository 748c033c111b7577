//! Author-facing style declarations. Every field is optional so that a
//! declaration only overrides the keys it actually sets.
use crate::dimension::Padding;
use crate::font::{FontStyle, FontWeight};
use crate::list::ListStyleType;
use crate::text::{TextAlign, TextDecoration, VerticalAlign};
use folio_types::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style_type: Option<ListStyleType>,
}

impl StyleProperties {
    /// Copies every property that `to_apply` sets over the value in `self`.
    pub fn merge(&mut self, to_apply: &StyleProperties) {
        if to_apply.font_family.is_some() {
            self.font_family = to_apply.font_family.clone();
        }
        if to_apply.font_size.is_some() {
            self.font_size = to_apply.font_size;
        }
        if to_apply.font_weight.is_some() {
            self.font_weight = to_apply.font_weight;
        }
        if to_apply.font_style.is_some() {
            self.font_style = to_apply.font_style;
        }
        if to_apply.color.is_some() {
            self.color = to_apply.color.clone();
        }
        if to_apply.background_color.is_some() {
            self.background_color = to_apply.background_color.clone();
        }
        if to_apply.text_align.is_some() {
            self.text_align = to_apply.text_align;
        }
        if to_apply.vertical_align.is_some() {
            self.vertical_align = to_apply.vertical_align;
        }
        if to_apply.line_height.is_some() {
            self.line_height = to_apply.line_height;
        }
        if to_apply.text_decoration.is_some() {
            self.text_decoration = to_apply.text_decoration;
        }
        if to_apply.border_width.is_some() {
            self.border_width = to_apply.border_width;
        }
        if to_apply.border_color.is_some() {
            self.border_color = to_apply.border_color.clone();
        }
        if to_apply.padding.is_some() {
            self.padding = to_apply.padding;
        }
        if to_apply.opacity.is_some() {
            self.opacity = to_apply.opacity;
        }
        if to_apply.list_style_type.is_some() {
            self.list_style_type = to_apply.list_style_type;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StyleProperties::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r##"{"fontSize": 9, "backgroundColor": "#eee", "padding": 4, "textAlign": "center"}"##;
        let props: StyleProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.font_size, Some(9.0));
        assert_eq!(props.background_color, Some(Color::rgb(0xee, 0xee, 0xee)));
        assert_eq!(props.padding, Some(Padding::Uniform(4.0)));
        assert_eq!(props.text_align, Some(TextAlign::Center));
    }

    #[test]
    fn test_merge_only_overrides_set_keys() {
        let mut base = StyleProperties {
            font_size: Some(10.0),
            color: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        };
        base.merge(&StyleProperties {
            font_size: Some(14.0),
            ..Default::default()
        });
        assert_eq!(base.font_size, Some(14.0));
        assert_eq!(base.color, Some(Color::rgb(1, 2, 3)));
    }
}
