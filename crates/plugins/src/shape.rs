use crate::color::{check_color, check_one_of, color_prop};
use async_trait::async_trait;
use folio_render_core::{
    ElementPlugin, Props, PropsExt, RenderContext, RenderError, ValidationError, merge_defaults,
};
use folio_template::Element;
use serde_json::json;

/// A filled and/or stroked rectangle or ellipse. With neither `fill` nor
/// `stroke` set the outline is drawn in the text color.
pub struct ShapePlugin;

#[async_trait]
impl ElementPlugin for ShapePlugin {
    fn kind(&self) -> &'static str {
        "shape"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(json!({"shape": "rectangle", "strokeWidth": 1.0}), raw)
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_one_of(props, "shape", &["rectangle", "ellipse"], &mut errors);
        check_color(props, "fill", &mut errors);
        check_color(props, "stroke", &mut errors);
        errors
    }

    async fn render(
        &self,
        _element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let ellipse = props.str_prop("shape") == Some("ellipse");
        let fill = color_prop(props, "fill");
        let stroke = match color_prop(props, "stroke") {
            None if fill.is_none() => Some(ctx.style.color.clone()),
            other => other,
        };
        let width = props.f32_prop("strokeWidth").unwrap_or(1.0).max(0.0);
        let rect = ctx.rect;

        if let Some(fill) = &fill {
            if ellipse {
                ctx.surface.fill_ellipse(rect, fill);
            } else {
                ctx.surface.fill_rect(rect, fill);
            }
        }
        if let Some(stroke) = stroke.as_ref().filter(|_| width > 0.0) {
            if ellipse {
                ctx.surface.stroke_ellipse(rect, stroke, width);
            } else {
                ctx.surface.stroke_rect(rect, stroke, width);
            }
        }
        Ok(())
    }
}
