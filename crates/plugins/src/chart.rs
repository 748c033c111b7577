use crate::barcode::generation_spec;
use crate::color::check_one_of;
use crate::image::{draw_fitted, fit_prop};
use async_trait::async_trait;
use folio_render_core::{
    ElementPlugin, Props, RenderContext, RenderError, ValidationError, merge_defaults,
};
use folio_template::Element;
use serde_json::{Value, json};

/// A chart rasterized by the configured generator from `data` (inline or
/// the array bound at `field`).
pub struct ChartPlugin;

#[async_trait]
impl ElementPlugin for ChartPlugin {
    fn kind(&self) -> &'static str {
        "chart"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(json!({"chartType": "bar", "fit": "contain"}), raw)
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_one_of(props, "chartType", &["bar", "line", "pie", "area", "scatter"], &mut errors);
        let has_field = props.get("field").is_some_and(Value::is_string);
        match props.get("data") {
            Some(Value::Array(_)) => {}
            None | Some(Value::Null) if has_field => {}
            None | Some(Value::Null) => errors.push(ValidationError::missing("data")),
            Some(other) => errors.push(ValidationError::new("data", format!("must be an array, got {}", other))),
        }
        errors
    }

    async fn render(
        &self,
        _element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let spec = generation_spec(props, &ctx.scope, "data");
        let image = ctx.resources.chart(&spec).await?;
        draw_fitted(ctx, &image, fit_prop(props))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_data_or_field() {
        let ok = ChartPlugin.resolve_props(json!({"data": [1, 2, 3]}).as_object().unwrap());
        assert!(ChartPlugin.validate(&ok).is_empty());
        let bound = ChartPlugin.resolve_props(json!({"field": "sales"}).as_object().unwrap());
        assert!(ChartPlugin.validate(&bound).is_empty());
        let bad = ChartPlugin.resolve_props(json!({"chartType": "radar"}).as_object().unwrap());
        let names: Vec<_> = ChartPlugin.validate(&bad).into_iter().map(|e| e.property).collect();
        assert_eq!(names, vec!["chartType", "data"]);
    }
}
