//! Raster images from files, URLs or data URIs.

use crate::color::check_one_of;
use async_trait::async_trait;
use folio_layout::ElementMeasure;
use folio_render_core::{
    ElementPlugin, FitMode, MeasureContext, Props, PropsExt, RenderContext, RenderError,
    ValidationError, fit_box, merge_defaults,
};
use folio_resource::LoadedImage;
use folio_template::Element;
use folio_types::{Rect, Size};
use serde_json::json;

pub struct ImagePlugin;

/// Draws `image` into `ctx.rect` according to `fit`, clipping when the
/// fitted box overflows.
pub(crate) fn draw_fitted(ctx: &mut RenderContext<'_>, image: &LoadedImage, fit: FitMode) -> Result<(), RenderError> {
    let rect = ctx.rect;
    let fitted = fit_box(image.width as f32, image.height as f32, rect.width, rect.height, fit);
    if fitted.draw_width <= 0.0 || fitted.draw_height <= 0.0 {
        return Ok(());
    }
    // Page space grows upwards: the offset is measured from the top edge.
    let target = Rect::new(
        rect.x + fitted.offset_x,
        rect.y + rect.height - fitted.offset_y - fitted.draw_height,
        fitted.draw_width,
        fitted.draw_height,
    );
    if fitted.clip {
        ctx.surface.save_state();
        ctx.surface.clip(rect);
        let drawn = ctx.surface.image(image, target);
        ctx.surface.restore_state();
        drawn
    } else {
        ctx.surface.image(image, target)
    }
}

pub(crate) fn fit_prop(props: &Props) -> FitMode {
    props.str_prop("fit").and_then(FitMode::parse).unwrap_or_default()
}

impl ImagePlugin {
    fn source(props: &Props, field_text: impl FnOnce(&str) -> Option<String>) -> Result<String, RenderError> {
        if let Some(src) = props.str_prop("src").filter(|s| !s.is_empty()) {
            return Ok(src.to_string());
        }
        match props.str_prop("field") {
            Some(field) => field_text(field)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| RenderError::InvalidProperties(format!("field '{}' holds no image source", field))),
            None => Err(RenderError::InvalidProperties("image has no 'src'".into())),
        }
    }
}

#[async_trait]
impl ElementPlugin for ImagePlugin {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(json!({"fit": "contain"}), raw)
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if props.str_prop("src").is_none() && props.str_prop("field").is_none() {
            errors.push(ValidationError::missing("src"));
        }
        check_one_of(props, "fit", &["contain", "cover", "fill", "none"], &mut errors);
        errors
    }

    /// Only loads the image when a declared dimension is zero, to derive it
    /// from the aspect ratio.
    async fn measure(
        &self,
        element: &Element,
        props: &Props,
        ctx: &MeasureContext<'_>,
    ) -> Result<ElementMeasure, RenderError> {
        if element.width > 0.0 && element.height > 0.0 {
            return Ok(ElementMeasure::declared(element));
        }
        let src = Self::source(props, |field| ctx.field_text(field))?;
        let image = ctx.resources.image(&src).await?;
        let ratio = image.aspect_ratio();
        let size = match (element.width > 0.0, element.height > 0.0) {
            (true, false) if ratio > 0.0 => Size::new(element.width, element.width / ratio),
            (false, true) => Size::new(element.height * ratio, element.height),
            _ => Size::new(image.width as f32, image.height as f32),
        };
        Ok(ElementMeasure::fixed(size))
    }

    async fn render(
        &self,
        _element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let scope = ctx.scope;
        let src = Self::source(props, |field| scope.field_text(field))?;
        let image = ctx.resources.image(&src).await?;
        draw_fitted(ctx, &image, fit_prop(props))
    }
}
