//! Static or data-bound text with page tokens.

mod wrap;

pub use wrap::{TextBlock, wrap_lines};

use crate::color::check_one_of;
use async_trait::async_trait;
use folio_layout::ElementMeasure;
use folio_render_core::{
    ElementPlugin, MeasureContext, Props, PropsExt, RenderContext, RenderError, ValidationError,
    merge_defaults,
};
use folio_template::Element;
use folio_types::{DiagnosticKind, Size};
use serde_json::json;

/// Draws `text` (or the value at `field`) wrapped to the element width.
/// The box grows to fit its lines but never shrinks below the declared height.
pub struct TextPlugin;

impl TextPlugin {
    fn content<'p>(props: &'p Props) -> Content<'p> {
        match props.str_prop("field") {
            Some(field) => Content::Field(field),
            None => Content::Literal(props.str_prop("text").unwrap_or_default()),
        }
    }
}

enum Content<'p> {
    Literal(&'p str),
    Field(&'p str),
}

#[async_trait]
impl ElementPlugin for TextPlugin {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(json!({"text": "", "wrap": true}), raw)
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for key in ["text", "field"] {
            if let Some(value) = props.get(key).filter(|v| !v.is_null() && !v.is_string()) {
                errors.push(ValidationError::new(key, format!("must be a string, got {}", value)));
            }
        }
        if props.get("wrap").is_some_and(|v| !v.is_boolean()) {
            errors.push(ValidationError::new("wrap", "must be a boolean"));
        }
        check_one_of(props, "overflow", &["grow", "clip"], &mut errors);
        errors
    }

    async fn measure(
        &self,
        element: &Element,
        props: &Props,
        ctx: &MeasureContext<'_>,
    ) -> Result<ElementMeasure, RenderError> {
        let text = match Self::content(props) {
            Content::Literal(text) => ctx.substitute(text),
            Content::Field(field) => ctx.field_text(field).unwrap_or_default(),
        };
        if props.str_prop("overflow") == Some("clip") {
            return Ok(ElementMeasure::declared(element));
        }
        let wrap = props.bool_prop("wrap").unwrap_or(true);
        let block = TextBlock::layout(&text, ctx.style, ctx.available.width, wrap);
        let height = block.height(&ctx.style.padding).max(element.height);
        Ok(ElementMeasure::fixed(Size::new(element.width, height)))
    }

    async fn render(
        &self,
        element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let text = match Self::content(props) {
            Content::Literal(text) => ctx.scope.substitute(text),
            Content::Field(field) => match ctx.scope.field_text(field) {
                Some(text) => text,
                None => {
                    ctx.warn(
                        element,
                        DiagnosticKind::TemplateData,
                        format!("Field '{}' is not present in the data", field),
                    );
                    String::new()
                }
            },
        };
        let wrap = props.bool_prop("wrap").unwrap_or(true);
        let block = TextBlock::layout(&text, ctx.style, ctx.rect.width, wrap);
        if props.str_prop("overflow") == Some("clip") {
            ctx.surface.save_state();
            ctx.surface.clip(ctx.rect);
            block.draw(ctx.surface, ctx.rect, ctx.style);
            ctx.surface.restore_state();
        } else {
            block.draw(ctx.surface, ctx.rect, ctx.style);
        }
        Ok(())
    }
}
