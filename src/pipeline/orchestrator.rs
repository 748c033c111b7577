use super::config::{PipelineConfig, RenderOptions, RenderOutput};
use super::sources::image_sources;
use crate::error::PipelineError;
use folio_layout::{LayoutEngine, LayoutResult, collect_anchors};
use folio_render_core::{DocumentSurface, PageRenderer, PluginRegistry};
use folio_render_lopdf::LopdfDocument;
use folio_template::Template;
use folio_types::Diagnostics;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// A configured template ready to render any number of payloads.
///
/// The pipeline is immutable once built and can be shared between tasks;
/// every render gets its own diagnostics and layout. Resource caches are
/// shared across renders.
pub struct DocumentPipeline {
    template: Arc<Template>,
    registry: PluginRegistry,
    config: PipelineConfig,
}

impl DocumentPipeline {
    pub(super) fn new(template: Template, registry: PluginRegistry, config: PipelineConfig) -> Self {
        Self {
            template: Arc::new(template),
            registry,
            config,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Lays out and renders `data` into PDF bytes.
    pub async fn render(&self, data: Value, options: &RenderOptions) -> Result<RenderOutput, PipelineError> {
        let strict = options.strict || self.config.strict;
        let data = Arc::new(data);
        let mut diagnostics = Diagnostics::new();

        self.registry.validate_template(&self.template, &mut diagnostics);
        self.prefetch().await;

        let layout = LayoutEngine::new(&self.template, &self.registry)
            .with_config(self.config.layout)
            .layout(Arc::clone(&data), &mut diagnostics)
            .await?;
        let total_pages = layout.total_pages();
        log::info!("Layout complete: {} page(s)", total_pages);

        let bytes = self
            .draw(&layout, &data, options.compress, &mut diagnostics)
            .await?;
        log::info!(
            "Rendered {} page(s), {} bytes, {} diagnostic(s)",
            total_pages,
            bytes.len(),
            diagnostics.len()
        );

        if strict && diagnostics.has_warnings() {
            return Err(PipelineError::Strict {
                diagnostics: diagnostics.into_vec(),
            });
        }

        Ok(RenderOutput {
            bytes,
            page_count: total_pages,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Blocking wrapper around [`render`](Self::render) on a private
    /// current-thread runtime. Must not be called from inside a runtime.
    pub fn render_sync(&self, data: Value, options: &RenderOptions) -> Result<RenderOutput, PipelineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.render(data, options))
    }

    /// Renders and writes the document to `path`.
    pub async fn render_to_file<P: AsRef<Path>>(
        &self,
        data: Value,
        options: &RenderOptions,
        path: P,
    ) -> Result<RenderOutput, PipelineError> {
        let output = self.render(data, options).await?;
        let path = path.as_ref();
        tokio::fs::write(path, &output.bytes).await?;
        log::info!("Wrote {}", path.display());
        Ok(output)
    }

    /// Warms the image cache with every literal source in the template.
    /// Failures are reported by the element that uses the source.
    async fn prefetch(&self) {
        let sources = image_sources(&self.template);
        if sources.is_empty() {
            return;
        }
        for (source, result) in self.registry.resources().prefetch_images(sources).await {
            if let Err(e) = result {
                log::debug!("Prefetch of '{}' failed: {}", source, e);
            }
        }
    }

    async fn draw(
        &self,
        layout: &LayoutResult,
        data: &Value,
        compress: bool,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<u8>, PipelineError> {
        let anchors = collect_anchors(layout, self.config.anchors, diagnostics);
        let renderer = PageRenderer {
            registry: &self.registry,
            template: &self.template,
            anchors: &anchors,
            root: data,
            total_pages: layout.total_pages(),
        };

        let document = LopdfDocument::new();
        let mut document: Box<dyn DocumentSurface> = if compress {
            Box::new(document)
        } else {
            Box::new(document.without_compression())
        };

        for page in &layout.pages {
            document.begin_page(page.geometry.width, page.geometry.height)?;
            renderer
                .render_page(page, document.page()?, diagnostics)
                .await?;
            document.end_page()?;
        }
        Ok(document.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{PipelineBuilder, PipelineError, RenderOptions};
    use serde_json::json;

    fn pipeline(template: serde_json::Value) -> crate::DocumentPipeline {
        PipelineBuilder::new()
            .with_template_source(&template.to_string())
            .unwrap()
            .with_remote_resources(false)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_renders_single_page() {
        let _ = env_logger::builder().is_test(true).try_init();
        let pipeline = pipeline(json!({
            "sections": [{"bands": [
                {"type": "title", "height": 30, "elements": [
                    {"id": "t", "type": "text", "width": 200, "height": 20, "properties": {"text": "Hello"}}
                ]}
            ]}]
        }));
        let output = pipeline.render(json!({}), &RenderOptions::default()).await.unwrap();
        assert_eq!(output.page_count, 1);
        assert!(output.bytes.starts_with(b"%PDF-"));
        assert_eq!(output.warnings().count(), 0);
    }

    #[tokio::test]
    async fn test_strict_fails_on_unknown_element() {
        let pipeline = pipeline(json!({
            "sections": [{"bands": [
                {"type": "title", "height": 30, "elements": [
                    {"id": "w", "type": "widget", "width": 20, "height": 20}
                ]}
            ]}]
        }));
        let lenient = pipeline.render(json!({}), &RenderOptions::default()).await.unwrap();
        assert!(lenient.warnings().count() >= 1);

        let strict = pipeline.render(json!({}), &RenderOptions::strict()).await;
        assert!(matches!(strict, Err(PipelineError::Strict { diagnostics }) if !diagnostics.is_empty()));
    }

    #[test]
    fn test_render_sync() {
        let pipeline = pipeline(json!({
            "sections": [{"bands": [{"type": "body", "height": 50}]}]
        }));
        let output = pipeline.render_sync(json!({}), &RenderOptions::default()).unwrap();
        assert!(output.bytes.starts_with(b"%PDF-"));
        assert_eq!(output.page_count, 1);
    }
}
