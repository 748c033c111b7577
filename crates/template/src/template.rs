use crate::band::{Band, ColumnConfig};
use crate::error::TemplateError;
use crate::page::{PageConfig, PartialPageConfig};
use folio_style::{FontStyle, FontWeight, StyleProperties};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub styles: HashMap<String, StyleProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_style: Option<StyleProperties>,
    /// JSON Schema describing the expected payload. Carried, not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<FontDeclaration>,
}

impl Template {
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self, TemplateError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let template = Self::from_json(&text)?;
        log::debug!(
            "Loaded template {} with {} section(s)",
            path.display(),
            template.sections.len()
        );
        Ok(template)
    }

    /// Resolved page geometry for the section at `index`.
    pub fn section_page(&self, index: usize) -> Option<PageConfig> {
        self.sections
            .get(index)
            .map(|section| self.page.merge(section.page.as_ref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PartialPageConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnConfig>,
    #[serde(default)]
    pub bands: Vec<Band>,
}

/// A font family declared by the template. Only the base-14 families are
/// rendered natively; others fall back to Helvetica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDeclaration {
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::BandType;

    #[test]
    fn test_parse_minimal_template() {
        let json = r#"{
            "page": {"width": 612, "height": 792, "margins": {"top": 36, "right": 36, "bottom": 36, "left": 36}},
            "styles": {"h1": {"fontSize": 18, "fontWeight": "bold"}},
            "sections": [{
                "page": {"margins": {"left": 72}},
                "columns": {"count": 2, "gap": 12},
                "bands": [
                    {"type": "title", "height": 30},
                    {"type": "detail", "height": 14, "dataSource": "rows"}
                ]
            }]
        }"#;
        let template = Template::from_json(json).unwrap();
        assert_eq!(template.sections[0].bands[1].band_type, BandType::Detail);
        assert_eq!(template.styles["h1"].font_size, Some(18.0));
        let page = template.section_page(0).unwrap();
        assert_eq!(page.margins.left, 72.0);
        assert_eq!(page.margins.right, 36.0);
        assert!(template.section_page(1).is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Template::from_json("{\"sections\": 3}"),
            Err(TemplateError::Json(_))
        ));
    }

    #[test]
    fn test_default_page_is_a4() {
        let template = Template::from_json("{}").unwrap();
        assert_eq!(template.page.width, 595.28);
        assert_eq!(template.page.margins.top, 40.0);
    }
}
