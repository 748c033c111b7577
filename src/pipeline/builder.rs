use super::config::PipelineConfig;
use super::orchestrator::DocumentPipeline;
use crate::error::PipelineError;
use folio_layout::{AnchorOptions, LayoutConfig};
use folio_plugins::register_builtins;
use folio_render_core::{ElementPlugin, PluginRegistry};
use folio_resource::{ImageGenerator, ResourceCaches, ResourceFetcher, ResourceLoader};
use folio_template::Template;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// A builder for creating a [`DocumentPipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    template: Option<Template>,
    config: PipelineConfig,
    base_path_set: bool,
    plugins: Vec<Arc<dyn ElementPlugin>>,
    fetcher: Option<Arc<dyn ResourceFetcher>>,
    barcode_generator: Option<Arc<dyn ImageGenerator>>,
    chart_generator: Option<Arc<dyn ImageGenerator>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Parses the template from JSON text.
    pub fn with_template_source(mut self, json: &str) -> Result<Self, PipelineError> {
        self.template = Some(Template::from_json(json)?);
        Ok(self)
    }

    /// Loads the template from a JSON file. Unless a base path was set
    /// explicitly, relative resource paths resolve against the file's directory.
    pub fn with_template_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let template = Template::from_file(path).map_err(|e| {
            log::error!("Failed to load template from '{}': {}", path.display(), e);
            e
        })?;
        if !self.base_path_set {
            self.config.resources.base_path = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
        }
        self.template = Some(template);
        Ok(self)
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self.base_path_set = true;
        self
    }

    pub fn with_base_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.resources.base_path = path.into();
        self.base_path_set = true;
        self
    }

    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.layout.max_pages = max_pages;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.config.resources.http_timeout = timeout;
        self
    }

    pub fn with_remote_resources(mut self, allow: bool) -> Self {
        self.config.resources.allow_remote = allow;
        self
    }

    pub fn with_anchor_options(mut self, anchors: AnchorOptions) -> Self {
        self.config.anchors = anchors;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Adds or replaces an element plugin.
    pub fn with_plugin(mut self, plugin: Arc<dyn ElementPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Replaces the default filesystem/http/data-URI fetcher.
    pub fn with_resource_fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_barcode_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.barcode_generator = Some(generator);
        self
    }

    pub fn with_chart_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.chart_generator = Some(generator);
        self
    }

    /// Consumes the builder and creates the `DocumentPipeline`.
    pub fn build(self) -> Result<DocumentPipeline, PipelineError> {
        let template = self.template.ok_or_else(|| {
            PipelineError::Config(
                "No template has been configured. Use `with_template_file` or `with_template`.".to_string(),
            )
        })?;
        if self.config.layout.max_pages == 0 {
            return Err(PipelineError::Config("max_pages must be at least 1".to_string()));
        }

        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Arc::new(ResourceLoader::new(self.config.resources.clone())));
        let mut caches = ResourceCaches::new(fetcher);
        if let Some(generator) = self.barcode_generator {
            caches = caches.with_barcode_generator(generator);
        }
        if let Some(generator) = self.chart_generator {
            caches = caches.with_chart_generator(generator);
        }

        let mut registry = PluginRegistry::new(Arc::new(caches));
        register_builtins(&mut registry);
        for plugin in self.plugins {
            registry.register(plugin);
        }
        log::info!(
            "Pipeline ready: {} section(s), plugins [{}]",
            template.sections.len(),
            registry.kinds().join(", ")
        );

        Ok(DocumentPipeline::new(template, registry, self.config))
    }
}
