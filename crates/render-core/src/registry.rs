use crate::error::RenderError;
use crate::plugin::{ElementPlugin, MeasureContext};
use async_trait::async_trait;
use folio_layout::{ElementMeasure, ElementMeasurer, MeasureError, MeasureRequest};
use folio_resource::ResourceCaches;
use folio_template::{Band, Element, Template};
use folio_types::{Diagnostic, DiagnosticKind, Diagnostics};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps element type tags to plugins. Also the layout engine's measurement
/// seam, so the engine itself never looks at type tags.
pub struct PluginRegistry {
    plugins: HashMap<&'static str, Arc<dyn ElementPlugin>>,
    resources: Arc<ResourceCaches>,
}

impl PluginRegistry {
    pub fn new(resources: Arc<ResourceCaches>) -> Self {
        Self {
            plugins: HashMap::new(),
            resources,
        }
    }

    /// Registers `plugin`, replacing and returning any plugin of the same kind.
    pub fn register(&mut self, plugin: Arc<dyn ElementPlugin>) -> Option<Arc<dyn ElementPlugin>> {
        log::debug!("Registering element plugin '{}'", plugin.kind());
        self.plugins.insert(plugin.kind(), plugin)
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn ElementPlugin>) -> Self {
        self.register(plugin);
        self
    }

    pub fn get(&self, kind: &str) -> Option<&Arc<dyn ElementPlugin>> {
        self.plugins.get(kind)
    }

    /// Registered type tags, sorted.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.plugins.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn resources(&self) -> &ResourceCaches {
        &self.resources
    }

    /// Runs every plugin's structural validation over the template,
    /// including container children and frame bands. Problems and unknown
    /// element types become `Validation` diagnostics.
    pub fn validate_template(&self, template: &Template, diagnostics: &mut Diagnostics) {
        for section in &template.sections {
            self.validate_bands(&section.bands, diagnostics);
        }
    }

    fn validate_bands(&self, bands: &[Band], diagnostics: &mut Diagnostics) {
        for band in bands {
            for element in &band.elements {
                self.validate_element(element, diagnostics);
            }
        }
    }

    fn validate_element(&self, element: &Element, diagnostics: &mut Diagnostics) {
        match self.get(&element.kind) {
            Some(plugin) => {
                let props = plugin.resolve_props(&element.properties);
                for problem in plugin.validate(&props) {
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticKind::Validation,
                            format!("'{}' element: {}", element.kind, problem),
                        )
                        .with_element(&element.id),
                    );
                }
            }
            None => diagnostics.push(
                Diagnostic::warning(
                    DiagnosticKind::Validation,
                    RenderError::UnknownElement(element.kind.clone()).to_string(),
                )
                .with_element(&element.id),
            ),
        }
        for child in &element.children {
            self.validate_element(child, diagnostics);
        }
        self.validate_bands(&element.bands, diagnostics);
    }
}

#[async_trait]
impl ElementMeasurer for PluginRegistry {
    async fn measure(
        &self,
        element: &Element,
        request: &MeasureRequest<'_>,
    ) -> Result<ElementMeasure, MeasureError> {
        let plugin = self
            .get(&element.kind)
            .ok_or_else(|| RenderError::UnknownElement(element.kind.clone()))?;
        let props = plugin.resolve_props(&element.properties);
        let ctx = MeasureContext {
            available: request.available,
            style: request.style,
            scope: request.scope,
            root: request.root,
            resources: &self.resources,
        };
        Ok(plugin.measure(element, &props, &ctx).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::plugin::{Props, RenderContext};
    use folio_layout::Scope;
    use folio_resource::{InMemoryResourceProvider, ResourceConfig, ResourceLoader};
    use folio_style::ResolvedStyle;
    use folio_types::Size;
    use serde_json::{Value, json};

    struct Stamp;

    #[async_trait]
    impl ElementPlugin for Stamp {
        fn kind(&self) -> &'static str {
            "stamp"
        }

        fn validate(&self, props: &Props) -> Vec<ValidationError> {
            if props.contains_key("label") {
                Vec::new()
            } else {
                vec![ValidationError::missing("label")]
            }
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

    fn registry() -> PluginRegistry {
        let loader = ResourceLoader::with_provider(
            ResourceConfig::default(),
            Arc::new(InMemoryResourceProvider::new()),
        );
        PluginRegistry::new(Arc::new(ResourceCaches::new(Arc::new(loader)))).with_plugin(Arc::new(Stamp))
    }

    #[tokio::test]
    async fn test_measure_dispatches_by_kind() {
        let registry = registry();
        let style = ResolvedStyle::default();
        let scope = Scope::default();
        let root = Value::Null;
        let request = MeasureRequest {
            available: Size::new(10.0, 20.0),
            style: &style,
            scope: &scope,
            root: &root,
        };
        let element = Element::new("s", "stamp").at(0.0, 0.0, 10.0, 20.0);
        let measured = registry.measure(&element, &request).await.unwrap();
        assert_eq!(measured.size, Size::new(10.0, 20.0));

        let unknown = Element::new("w", "widget");
        let err = registry.measure(&unknown, &request).await.unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Validation);
    }

    #[test]
    fn test_validate_template_walks_nested_elements() {
        let template = Template::from_value(json!({
            "sections": [{"bands": [{"type": "body", "height": 10, "elements": [
                {"id": "box", "type": "stamp", "properties": {"label": "ok"}, "children": [
                    {"id": "inner", "type": "stamp"}
                ]},
                {"id": "odd", "type": "widget"}
            ]}]}]
        }))
        .unwrap();
        let mut diags = Diagnostics::new();
        registry().validate_template(&template, &mut diags);
        let ids: Vec<_> = diags.iter().filter_map(|d| d.element_id.clone()).collect();
        assert_eq!(ids, vec!["inner", "odd"]);
        assert_eq!(registry().kinds(), vec!["stamp"]);
    }
}
