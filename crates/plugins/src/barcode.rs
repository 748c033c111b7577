use crate::color::check_one_of;
use crate::image::{draw_fitted, fit_prop};
use async_trait::async_trait;
use folio_render_core::{
    ElementPlugin, Props, PropsExt, RenderContext, RenderError, RenderScope, ValidationError,
    merge_defaults,
};
use folio_template::Element;
use serde_json::{Value, json};

/// A barcode rasterized by the configured generator. The generation spec is
/// the resolved properties with `field` bound to its value.
pub struct BarcodePlugin;

const FORMATS: [&str; 6] = ["code128", "code39", "ean13", "ean8", "qr", "datamatrix"];

pub(crate) fn generation_spec(props: &Props, scope: &RenderScope<'_>, value_key: &str) -> Value {
    let mut spec = props.clone();
    if let Some(field) = props.str_prop("field") {
        let bound = scope.resolve(field).cloned().unwrap_or(Value::Null);
        spec.insert(value_key.to_string(), bound);
        spec.remove("field");
    }
    if let Some(Value::String(text)) = spec.get(value_key) {
        let text = scope.substitute(text);
        spec.insert(value_key.to_string(), Value::String(text));
    }
    Value::Object(spec)
}

#[async_trait]
impl ElementPlugin for BarcodePlugin {
    fn kind(&self) -> &'static str {
        "barcode"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(json!({"format": "code128", "fit": "contain"}), raw)
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if props.str_prop("value").is_none() && props.str_prop("field").is_none() {
            errors.push(ValidationError::missing("value"));
        }
        check_one_of(props, "format", &FORMATS, &mut errors);
        errors
    }

    async fn render(
        &self,
        _element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let spec = generation_spec(props, &ctx.scope, "value");
        let image = ctx.resources.barcode(&spec).await?;
        draw_fitted(ctx, &image, fit_prop(props))
    }
}
