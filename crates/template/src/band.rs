use crate::element::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BandType {
    Background,
    PageHeader,
    Title,
    ColumnHeader,
    GroupHeader,
    Detail,
    GroupFooter,
    NoData,
    Body,
    Summary,
    ColumnFooter,
    PageFooter,
    LastPageFooter,
}

impl BandType {
    /// Processing order within a section. Bands of equal priority keep their
    /// declaration order.
    pub fn priority(&self) -> u8 {
        match self {
            BandType::Background => 0,
            BandType::PageHeader => 1,
            BandType::ColumnHeader => 2,
            BandType::Title => 3,
            BandType::GroupHeader => 4,
            BandType::Detail => 5,
            BandType::GroupFooter => 6,
            BandType::Body => 7,
            BandType::Summary => 8,
            BandType::NoData => 9,
            BandType::ColumnFooter => 10,
            BandType::PageFooter | BandType::LastPageFooter => 11,
        }
    }

    /// Bands placed again on every physical page.
    pub fn is_repeating(&self) -> bool {
        matches!(
            self,
            BandType::Background
                | BandType::PageHeader
                | BandType::PageFooter
                | BandType::ColumnHeader
                | BandType::ColumnFooter
        )
    }

    /// Bands that consume the flowing cursor between the page header and footer.
    pub fn is_flow(&self) -> bool {
        matches!(
            self,
            BandType::Title
                | BandType::GroupHeader
                | BandType::Detail
                | BandType::GroupFooter
                | BandType::NoData
                | BandType::Body
                | BandType::Summary
        )
    }
}

/// Multi-column flow configuration of a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub count: usize,
    #[serde(default)]
    pub gap: f32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self { count: 1, gap: 0.0 }
    }
}

impl ColumnConfig {
    pub fn column_count(&self) -> usize {
        self.count.max(1)
    }

    /// Width of a single column inside `content_width`.
    pub fn column_width(&self, content_width: f32) -> f32 {
        let n = self.column_count() as f32;
        ((content_width - self.gap * (n - 1.0)) / n).max(0.0)
    }

    pub fn column_x(&self, index: usize, content_width: f32) -> f32 {
        index as f32 * (self.column_width(content_width) + self.gap)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub band_type: BandType,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub auto_height: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    /// Pre-resolved visibility. `false` removes the band without reserving space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Band {
    pub fn new(band_type: BandType, height: f32) -> Self {
        Self {
            id: None,
            band_type,
            height,
            auto_height: false,
            data_source: None,
            item_name: None,
            group_by: None,
            condition: None,
            anchor: None,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.condition != Some(false)
    }

    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => format!("{:?} '{}'", self.band_type, id),
            None => format!("{:?}", self.band_type),
        }
    }
}
