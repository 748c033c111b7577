use crate::color::{check_color, check_one_of, color_prop};
use async_trait::async_trait;
use folio_render_core::{
    ElementPlugin, Props, PropsExt, RenderContext, RenderError, ValidationError, merge_defaults,
};
use folio_template::Element;
use folio_types::Point;
use serde_json::json;

/// A straight rule across the element box.
pub struct LinePlugin;

#[async_trait]
impl ElementPlugin for LinePlugin {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(json!({"direction": "horizontal", "thickness": 1.0}), raw)
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_one_of(props, "direction", &["horizontal", "vertical", "diagonal"], &mut errors);
        check_color(props, "color", &mut errors);
        if props.f32_prop("thickness").is_some_and(|t| t < 0.0) {
            errors.push(ValidationError::new("thickness", "must not be negative"));
        }
        errors
    }

    async fn render(
        &self,
        _element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let r = ctx.rect;
        let (from, to) = match props.str_prop("direction") {
            Some("vertical") => {
                let x = r.x + r.width / 2.0;
                (Point::new(x, r.y + r.height), Point::new(x, r.y))
            }
            Some("diagonal") => (Point::new(r.x, r.y + r.height), Point::new(r.right(), r.y)),
            _ => {
                let y = r.y + r.height / 2.0;
                (Point::new(r.x, y), Point::new(r.right(), y))
            }
        };
        let color = color_prop(props, "color").unwrap_or_else(|| ctx.style.color.clone());
        let thickness = props.f32_prop("thickness").unwrap_or(1.0).max(0.0);
        ctx.surface.line(from, to, &color, thickness);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{caches, measured, render};
    use folio_layout::Scope;
    use folio_render_core::testing::DrawOp;
    use folio_types::{Color, Rect};
    use serde_json::Value;

    #[tokio::test]
    async fn test_vertical_line_runs_through_the_middle() {
        let element = Element::new("rule", "line")
            .with_property("direction", "vertical")
            .with_property("color", "#ff0000")
            .with_property("thickness", 2.0);
        let scope = Scope::for_section(0).on_page(1, 1);
        let (surface, _, result) = render(
            &LinePlugin,
            &element,
            &measured(10.0, 40.0),
            Rect::new(0.0, 100.0, 10.0, 40.0),
            &scope,
            &Value::Null,
            &caches(),
        )
        .await;
        result.unwrap();
        assert_eq!(
            surface.ops,
            vec![DrawOp::Line(
                Point::new(5.0, 140.0),
                Point::new(5.0, 100.0),
                Color::rgb(255, 0, 0),
                2.0
            )]
        );
    }

    #[test]
    fn test_validate_direction_and_color() {
        let props = LinePlugin.resolve_props(
            json!({"direction": "sideways", "color": "red", "thickness": -1}).as_object().unwrap(),
        );
        assert_eq!(LinePlugin.validate(&props).len(), 3);
    }
}
