use folio_style::{Margins, PageSize};
use serde::{Deserialize, Serialize};

fn default_margins() -> Margins {
    Margins::all(40.0)
}

/// Page geometry in points. Missing fields fall back to A4 with 40pt margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl Default for PageConfig {
    fn default() -> Self {
        let (width, height) = PageSize::A4.dimensions_pt();
        Self {
            width,
            height,
            margins: default_margins(),
        }
    }
}

impl PageConfig {
    pub fn from_size(size: PageSize, margins: Margins) -> Self {
        let (width, height) = size.dimensions_pt();
        Self {
            width,
            height,
            margins,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margins.horizontal()
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margins.vertical()
    }

    /// Applies a section override. Set fields win; margins merge per side.
    pub fn merge(&self, partial: Option<&PartialPageConfig>) -> PageConfig {
        let Some(partial) = partial else {
            return self.clone();
        };
        let (mut width, mut height) = (self.width, self.height);
        if let Some(size) = partial.size {
            (width, height) = size.dimensions_pt();
        }
        let margins = match &partial.margins {
            Some(m) => m.apply_to(&self.margins),
            None => self.margins,
        };
        PageConfig {
            width: partial.width.unwrap_or(width),
            height: partial.height.unwrap_or(height),
            margins,
        }
    }
}

/// A section-level page override. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<PartialMargins>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialMargins {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
}

impl PartialMargins {
    pub fn apply_to(&self, base: &Margins) -> Margins {
        Margins {
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_without_override() {
        let base = PageConfig::default();
        assert_eq!(base.merge(None), base);
    }

    #[test]
    fn test_merge_margins_per_side() {
        let base = PageConfig {
            width: 612.0,
            height: 792.0,
            margins: Margins::all(36.0),
        };
        let partial: PartialPageConfig =
            serde_json::from_str(r#"{"height": 500, "margins": {"top": 10}}"#).unwrap();
        let merged = base.merge(Some(&partial));
        assert_eq!(merged.width, 612.0);
        assert_eq!(merged.height, 500.0);
        assert_eq!(merged.margins.top, 10.0);
        assert_eq!(merged.margins.left, 36.0);
        assert_eq!(merged.margins.bottom, 36.0);
    }

    #[test]
    fn test_named_size_override() {
        let partial: PartialPageConfig = serde_json::from_str(r#"{"size": "Letter"}"#).unwrap();
        let merged = PageConfig::default().merge(Some(&partial));
        assert_eq!((merged.width, merged.height), (612.0, 792.0));
    }

    #[test]
    fn test_content_area() {
        let page = PageConfig::from_size(PageSize::Letter, Margins::all(36.0));
        assert_eq!(page.content_width(), 540.0);
        assert_eq!(page.content_height(), 720.0);
    }
}
