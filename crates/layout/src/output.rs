//! The result of a layout pass.

use crate::measure::TableMetrics;
use crate::scope::Scope;
use folio_template::{Band, BandType, Element, PageConfig};
use folio_types::Size;
use std::sync::Arc;

pub type PageGeometry = PageConfig;

/// Measurement of one visible element, with its visible children and, for
/// frames, the nested sub-layout.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredElement {
    pub size: Size,
    pub table: Option<TableMetrics>,
    /// Aligned with `Element::children`; `None` for hidden children.
    pub children: Vec<Option<MeasuredElement>>,
    pub frame: Option<FrameLayout>,
}

/// Nested bands laid out inside a frame box, relative to the frame origin.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub bands: Vec<PlacedBand>,
    pub content_height: f32,
    /// Content extends past the frame box and is cut off when drawn.
    pub clipped: bool,
}

/// The rows of a split table drawn by one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSlice {
    /// Index of the table element in the band.
    pub element_index: usize,
    pub start_row: usize,
    pub end_row: usize,
    /// Whether the header row is drawn above the rows.
    pub header: bool,
    pub first: bool,
    pub last: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBand {
    pub band: Arc<Band>,
    /// Top edge relative to the page content area (or frame box).
    pub offset_y: f32,
    pub x_offset: f32,
    pub width: f32,
    pub measured_height: f32,
    /// Aligned with `Band::elements`; `None` for hidden elements.
    pub elements: Vec<Option<MeasuredElement>>,
    pub table_slice: Option<TableSlice>,
    pub scope: Scope,
    pub column: usize,
}

impl PlacedBand {
    pub fn band_type(&self) -> BandType {
        self.band.band_type
    }

    pub fn bottom(&self) -> f32 {
        self.offset_y + self.measured_height
    }

    /// Band-local bottom of the split table as declared, and how far elements
    /// below it move up to sit under the rows this slice draws.
    fn split_offsets(&self, slice: &TableSlice) -> (f32, f32) {
        let Some(table) = self.band.elements.get(slice.element_index) else {
            return (0.0, 0.0);
        };
        let Some(metrics) = self
            .elements
            .get(slice.element_index)
            .and_then(Option::as_ref)
            .and_then(|m| m.table.as_ref())
        else {
            return (0.0, 0.0);
        };
        let bottom = table.y + metrics.total_height();
        let top = if slice.first { table.y } else { 0.0 };
        let header = if slice.header { metrics.header_height } else { 0.0 };
        let drawn_bottom = top + header + metrics.rows_height(slice.start_row..slice.end_row);
        (bottom, bottom - drawn_bottom)
    }

    /// A split table is drawn by every slice. Elements above the table's
    /// bottom go with the first slice, those below it with the last.
    pub fn draws_element(&self, index: usize) -> bool {
        let Some(slice) = &self.table_slice else {
            return true;
        };
        if index == slice.element_index {
            return true;
        }
        let Some(element) = self.band.elements.get(index) else {
            return false;
        };
        let (bottom, _) = self.split_offsets(slice);
        if element.y < bottom {
            slice.first
        } else {
            slice.last
        }
    }

    /// Band-local y of the element at `index` in this placement.
    pub fn element_y(&self, index: usize, element: &Element) -> f32 {
        let Some(slice) = &self.table_slice else {
            return element.y;
        };
        if index == slice.element_index {
            return if slice.first { element.y } else { 0.0 };
        }
        let (bottom, shift) = self.split_offsets(slice);
        if element.y < bottom {
            element.y
        } else {
            element.y - shift
        }
    }

    /// Visible elements drawn by this placement, with their measurements.
    pub fn drawn_elements(&self) -> impl Iterator<Item = (usize, &Element, &MeasuredElement)> {
        self.band
            .elements
            .iter()
            .zip(&self.elements)
            .enumerate()
            .filter_map(|(i, (element, measured))| {
                measured
                    .as_ref()
                    .filter(|_| self.draws_element(i))
                    .map(|m| (i, element, m))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub section_index: usize,
    /// 0-based, global.
    pub page_index: usize,
    /// 1-based, global.
    pub page_number: usize,
    /// 1-based within the section.
    pub section_page_number: usize,
    pub geometry: PageGeometry,
    /// Background bands, held apart from the flow.
    pub background: Vec<PlacedBand>,
    pub bands: Vec<PlacedBand>,
}

impl Page {
    pub fn bands_of(&self, band_type: BandType) -> impl Iterator<Item = &PlacedBand> {
        self.bands.iter().filter(move |b| b.band_type() == band_type)
    }

    pub fn content_height(&self) -> f32 {
        self.geometry.content_height()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    pub pages: Vec<Page>,
}

impl LayoutResult {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Number of placements of `band_type` across all pages.
    pub fn count_of(&self, band_type: BandType) -> usize {
        self.pages.iter().map(|p| p.bands_of(band_type).count()).sum()
    }
}
