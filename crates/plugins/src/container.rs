use async_trait::async_trait;
use folio_render_core::{ElementPlugin, Props, RenderContext, RenderError};
use folio_template::Element;

/// Groups child elements under one local origin. The render pass draws the
/// style box and the children; the container itself draws nothing.
pub struct ContainerPlugin;

#[async_trait]
impl ElementPlugin for ContainerPlugin {
    fn kind(&self) -> &'static str {
        "container"
    }

    async fn render(
        &self,
        _element: &Element,
        _props: &Props,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        Ok(())
    }
}
