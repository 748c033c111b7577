use crate::band::Band;
use folio_style::{StyleProperties, Styled};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A positioned element. Coordinates are local to the enclosing band (or
/// container) and grow downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_overrides: Option<StyleProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Nested elements of a container, positioned relative to it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
    /// Independent bands of a frame, laid out inside the frame box.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<Band>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            properties: Map::new(),
            style: None,
            style_overrides: None,
            condition: None,
            anchor: None,
            children: Vec::new(),
            bands: Vec::new(),
        }
    }

    pub fn at(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn is_visible(&self) -> bool {
        self.condition != Some(false)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl Styled for Element {
    fn style_name(&self) -> Option<&str> {
        self.style.as_deref()
    }

    fn style_overrides(&self) -> Option<&StyleProperties> {
        self.style_overrides.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nested_element() {
        let json = r#"{
            "id": "box",
            "type": "container",
            "x": 10, "y": 5, "width": 200, "height": 50,
            "styleOverrides": {"fontSize": 8},
            "children": [
                {"id": "t", "type": "text", "properties": {"text": "Hi"}}
            ]
        }"#;
        let el: Element = serde_json::from_str(json).unwrap();
        assert_eq!(el.kind, "container");
        assert_eq!(el.children.len(), 1);
        assert_eq!(el.children[0].properties["text"], "Hi");
        assert_eq!(el.style_overrides().and_then(|s| s.font_size), Some(8.0));
        assert_eq!(el.bottom(), 55.0);
    }

    #[test]
    fn test_condition_false_hides() {
        let el: Element = serde_json::from_str(r#"{"type": "line", "condition": false}"#).unwrap();
        assert!(!el.is_visible());
    }
}
