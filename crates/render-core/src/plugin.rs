//! The per-element-type contract.

use crate::error::{RenderError, ValidationError};
use crate::surface::PageSurface;
use crate::tokens::{RenderScope, substitute_for_measure};
use async_trait::async_trait;
use folio_layout::{ElementMeasure, MeasuredElement, Scope, TableSlice};
use folio_resource::ResourceCaches;
use folio_style::ResolvedStyle;
use folio_template::Element;
use folio_types::{Diagnostic, DiagnosticKind, Diagnostics, Rect, Size};
use serde_json::{Map, Value};

/// Element properties as authored in the template.
pub type Props = Map<String, Value>;

/// Typed accessors over [`Props`].
pub trait PropsExt {
    fn str_prop(&self, key: &str) -> Option<&str>;
    fn f32_prop(&self, key: &str) -> Option<f32>;
    fn bool_prop(&self, key: &str) -> Option<bool>;
}

impl PropsExt for Props {
    fn str_prop(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn f32_prop(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(Value::as_f64).map(|v| v as f32)
    }

    fn bool_prop(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}

/// Overlays `raw` on `defaults` (a JSON object). Keys the author set win;
/// an explicit `null` falls back to the default.
pub fn merge_defaults(defaults: Value, raw: &Props) -> Props {
    let mut merged = match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in raw {
        if !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Everything a plugin needs to report its size.
pub struct MeasureContext<'a> {
    /// The element's declared box.
    pub available: Size,
    pub style: &'a ResolvedStyle,
    pub scope: &'a Scope,
    pub root: &'a Value,
    pub resources: &'a ResourceCaches,
}

impl MeasureContext<'_> {
    pub fn field_text(&self, path: &str) -> Option<String> {
        self.scope.field_text(path, self.root)
    }

    pub fn resolve(&self, path: &str) -> Option<&Value> {
        self.scope.resolve(path, self.root)
    }

    /// Page tokens with page counters bound and totals still unknown.
    pub fn substitute(&self, text: &str) -> String {
        substitute_for_measure(text, self.scope)
    }
}

/// Everything a plugin needs to draw itself.
pub struct RenderContext<'a> {
    pub surface: &'a mut dyn PageSurface,
    /// The element box in page space.
    pub rect: Rect,
    pub style: &'a ResolvedStyle,
    pub measured: &'a MeasuredElement,
    /// The rows to draw when this element is a split table.
    pub table_slice: Option<TableSlice>,
    pub scope: RenderScope<'a>,
    pub resources: &'a ResourceCaches,
    pub diagnostics: &'a mut Diagnostics,
}

impl RenderContext<'_> {
    pub fn warn(&mut self, element: &Element, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics.push(
            Diagnostic::warning(kind, message)
                .with_element(&element.id)
                .on_page(self.scope.scope.page_number),
        );
    }
}

/// Measures and draws one element type.
///
/// Implementations are registered in a [`crate::PluginRegistry`] under
/// their [`kind`](ElementPlugin::kind) tag.
#[async_trait]
pub trait ElementPlugin: Send + Sync {
    fn kind(&self) -> &'static str;

    /// Merges type defaults with the authored properties. Never fails; the
    /// result is fully populated.
    fn resolve_props(&self, raw: &Props) -> Props {
        raw.clone()
    }

    /// Structural checks on resolved properties.
    fn validate(&self, _props: &Props) -> Vec<ValidationError> {
        Vec::new()
    }

    /// Reports the occupied size. Defaults to the declared box.
    async fn measure(
        &self,
        element: &Element,
        _props: &Props,
        _ctx: &MeasureContext<'_>,
    ) -> Result<ElementMeasure, RenderError> {
        Ok(ElementMeasure::declared(element))
    }

    /// Draws the element at `ctx.rect`.
    async fn render(
        &self,
        element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_defaults() {
        let raw = json!({"fit": "cover", "alt": null, "extra": 1});
        let merged = merge_defaults(
            json!({"fit": "contain", "alt": ""}),
            raw.as_object().unwrap(),
        );
        assert_eq!(merged.str_prop("fit"), Some("cover"));
        assert_eq!(merged.str_prop("alt"), Some(""));
        assert_eq!(merged.f32_prop("extra"), Some(1.0));
        assert_eq!(merged.bool_prop("fit"), None);
    }
}
