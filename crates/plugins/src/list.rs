use crate::text::TextBlock;
use async_trait::async_trait;
use folio_layout::ElementMeasure;
use folio_render_core::{
    ElementPlugin, MeasureContext, Props, PropsExt, RenderContext, RenderError, TextRun,
    ValidationError, merge_defaults,
};
use folio_style::{Margins, ResolvedStyle};
use folio_template::{Element, display_value};
use folio_types::{Point, Rect, Size};
use serde_json::{Value, json};

/// A bulleted or numbered list. Items come from `items` or the array at
/// `field`; the marker style is the resolved `listStyleType`.
pub struct ListPlugin;

struct ListLayout {
    markers: Vec<String>,
    items: Vec<TextBlock>,
    indent: f32,
}

impl ListLayout {
    fn build(items: &[Value], props: &Props, style: &ResolvedStyle, width: f32) -> Self {
        let indent = props.f32_prop("indent").unwrap_or(18.0).max(0.0);
        let item_style = ResolvedStyle {
            padding: Margins::default(),
            ..style.clone()
        };
        let text_width = (width - style.padding.horizontal() - indent).max(0.0);
        let wrap = props.bool_prop("wrap").unwrap_or(true);
        Self {
            markers: (0..items.len()).map(|i| style.list_style_type.marker(i)).collect(),
            items: items
                .iter()
                .map(|item| TextBlock::layout(&display_value(item), &item_style, text_width, wrap))
                .collect(),
            indent,
        }
    }

    /// Empty items still take one line.
    fn item_height(block: &TextBlock) -> f32 {
        block.lines.len().max(1) as f32 * block.advance
    }

    fn height(&self, padding: &Margins) -> f32 {
        self.items.iter().map(Self::item_height).sum::<f32>() + padding.vertical()
    }
}

impl ListPlugin {
    fn items<'v>(props: &'v Props, resolve: impl FnOnce(&str) -> Option<&'v Value>) -> Result<&'v [Value], RenderError> {
        let value = match props.str_prop("field") {
            Some(field) => resolve(field),
            None => props.get("items"),
        };
        match value {
            Some(Value::Array(items)) => Ok(items),
            None | Some(Value::Null) => Ok(&[]),
            Some(other) => Err(RenderError::InvalidProperties(format!(
                "list items must be an array, got {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl ElementPlugin for ListPlugin {
    fn kind(&self) -> &'static str {
        "list"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(json!({"items": [], "indent": 18.0, "wrap": true}), raw)
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if props.get("field").is_none_or(Value::is_null) && !props.get("items").is_some_and(Value::is_array) {
            errors.push(ValidationError::new("items", "must be an array"));
        }
        errors
    }

    async fn measure(
        &self,
        element: &Element,
        props: &Props,
        ctx: &MeasureContext<'_>,
    ) -> Result<ElementMeasure, RenderError> {
        let items = Self::items(props, |path| ctx.resolve(path))?;
        let layout = ListLayout::build(items, props, ctx.style, ctx.available.width);
        let height = layout.height(&ctx.style.padding).max(element.height);
        Ok(ElementMeasure::fixed(Size::new(element.width, height)))
    }

    async fn render(
        &self,
        _element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let scope = ctx.scope;
        let items = Self::items(props, |path| scope.resolve(path))?;
        let layout = ListLayout::build(items, props, ctx.style, ctx.rect.width);
        let pad = ctx.style.padding;
        let left = ctx.rect.x + pad.left;
        let mut top = ctx.rect.y + ctx.rect.height - pad.top;
        let item_style = ResolvedStyle {
            padding: Margins::default(),
            ..ctx.style.clone()
        };

        for (marker, block) in layout.markers.iter().zip(&layout.items) {
            let height = ListLayout::item_height(block);
            if !marker.is_empty() {
                let ascent = block.font.ascent() * block.size / 1000.0;
                let leading = (block.advance - block.size) / 2.0;
                ctx.surface.text(&TextRun {
                    text: marker,
                    origin: Point::new(left, top - leading - ascent),
                    font: block.font,
                    size: block.size,
                    color: ctx.style.color.clone(),
                });
            }
            let text_rect = Rect::new(
                left + layout.indent,
                top - height,
                (ctx.rect.width - pad.horizontal() - layout.indent).max(0.0),
                height,
            );
            block.draw(ctx.surface, text_rect, &item_style);
            top -= height;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{caches, measure, measured, render};
    use folio_layout::Scope;

    #[tokio::test]
    async fn test_measure_one_line_per_short_item() {
        let element = Element::new("todo", "list")
            .at(0.0, 0.0, 200.0, 0.0)
            .with_property("items", json!(["alpha", "beta", ""]));
        let m = measure(&ListPlugin, &element, &Value::Null, &caches()).await.unwrap();
        assert!((m.size.height - 3.0 * 14.4).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_render_markers_and_items_from_field() {
        let element = Element::new("todo", "list").with_property("field", "steps");
        let root = json!({"steps": ["mix", "bake"]});
        let scope = Scope::for_section(0).on_page(1, 1);
        let (surface, _, result) = render(
            &ListPlugin,
            &element,
            &measured(200.0, 40.0),
            Rect::new(0.0, 0.0, 200.0, 40.0),
            &scope,
            &root,
            &caches(),
        )
        .await;
        result.unwrap();
        assert_eq!(surface.texts(), vec!["\u{2022}", "mix", "\u{2022}", "bake"]);
    }

    #[test]
    fn test_validate_items_shape() {
        let props = ListPlugin.resolve_props(json!({"items": "nope"}).as_object().unwrap());
        assert_eq!(ListPlugin.validate(&props).len(), 1);
        let props = ListPlugin.resolve_props(json!({"field": "steps"}).as_object().unwrap());
        assert!(ListPlugin.validate(&props).is_empty());
    }
}
