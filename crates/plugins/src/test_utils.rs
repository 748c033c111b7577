use folio_layout::{AnchorMap, MeasuredElement, Scope};
use folio_render_core::testing::RecordingSurface;
use folio_render_core::{ElementPlugin, MeasureContext, RenderContext, RenderScope};
use folio_resource::{InMemoryResourceProvider, ResourceCaches, ResourceConfig, ResourceLoader};
use folio_style::ResolvedStyle;
use folio_template::Element;
use folio_types::{Diagnostics, Rect, Size};
use serde_json::Value;
use std::sync::Arc;

pub fn provider() -> Arc<InMemoryResourceProvider> {
    Arc::new(InMemoryResourceProvider::new())
}

pub fn caches_with(provider: Arc<InMemoryResourceProvider>) -> Arc<ResourceCaches> {
    let config = ResourceConfig {
        allow_remote: false,
        ..Default::default()
    };
    Arc::new(ResourceCaches::new(Arc::new(ResourceLoader::with_provider(config, provider))))
}

pub fn caches() -> Arc<ResourceCaches> {
    caches_with(provider())
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ::image::RgbImage::new(width, height);
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ::image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Runs measure for `element` with a default style and an empty scope.
pub async fn measure(
    plugin: &dyn ElementPlugin,
    element: &Element,
    root: &Value,
    caches: &ResourceCaches,
) -> Result<folio_layout::ElementMeasure, folio_render_core::RenderError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let style = ResolvedStyle::default();
    let scope = Scope::for_section(0).on_page(1, 1);
    let ctx = MeasureContext {
        available: Size::new(element.width, element.height),
        style: &style,
        scope: &scope,
        root,
        resources: caches,
    };
    let props = plugin.resolve_props(&element.properties);
    plugin.measure(element, &props, &ctx).await
}

/// Renders `element` into `rect` on a recording surface.
pub async fn render(
    plugin: &dyn ElementPlugin,
    element: &Element,
    measured: &MeasuredElement,
    rect: Rect,
    scope: &Scope,
    root: &Value,
    caches: &ResourceCaches,
) -> (RecordingSurface, Diagnostics, Result<(), folio_render_core::RenderError>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let style = ResolvedStyle::default();
    let anchors = AnchorMap::default();
    let mut surface = RecordingSurface::new();
    let mut diagnostics = Diagnostics::new();
    let props = plugin.resolve_props(&element.properties);
    let result = {
        let mut ctx = RenderContext {
            surface: &mut surface,
            rect,
            style: &style,
            measured,
            table_slice: None,
            scope: RenderScope {
                scope,
                total_pages: 3,
                anchors: &anchors,
                root,
            },
            resources: caches,
            diagnostics: &mut diagnostics,
        };
        plugin.render(element, &props, &mut ctx).await
    };
    (surface, diagnostics, result)
}

pub fn measured(width: f32, height: f32) -> MeasuredElement {
    MeasuredElement {
        size: Size::new(width, height),
        table: None,
        children: Vec::new(),
        frame: None,
    }
}
