use async_trait::async_trait;
use folio_render_core::{ElementPlugin, Props, RenderContext, RenderError};
use folio_template::Element;

/// A box holding independently laid out bands. The layout engine runs the
/// nested sub-layout and the render pass draws it clipped to the frame.
pub struct FramePlugin;

#[async_trait]
impl ElementPlugin for FramePlugin {
    fn kind(&self) -> &'static str {
        "frame"
    }

    async fn render(
        &self,
        element: &Element,
        _props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        if let Some(frame) = &ctx.measured.frame
            && frame.clipped
        {
            log::debug!(
                "Frame '{}' content ({:.1}pt) is clipped to {:.1}pt",
                element.id,
                frame.content_height,
                ctx.rect.height
            );
        }
        Ok(())
    }
}
