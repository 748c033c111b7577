//! Anchor collection over a finished layout.

use crate::output::{LayoutResult, MeasuredElement, PlacedBand};
use folio_template::Element;
use folio_types::{AnchorId, Diagnostic, DiagnosticKind, Diagnostics};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct AnchorOptions {
    /// Report an anchor id claimed by two different bands or elements.
    pub warn_on_duplicates: bool,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            warn_on_duplicates: true,
        }
    }
}

/// Anchor id to 1-based page number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorMap {
    pages: HashMap<AnchorId, usize>,
}

impl AnchorMap {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.pages.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnchorId, usize)> {
        self.pages.iter().map(|(id, page)| (id, *page))
    }
}

/// Where an anchor was declared: the template band it was placed from plus
/// the element path inside it. Repeated placements of one declaration
/// (page headers, table continuations, detail items) share an origin.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Origin {
    band: usize,
    path: String,
}

struct Collector<'d> {
    options: AnchorOptions,
    anchors: AnchorMap,
    origins: HashMap<AnchorId, Origin>,
    reported: HashSet<AnchorId>,
    diagnostics: &'d mut Diagnostics,
}

impl Collector<'_> {
    fn record(&mut self, anchor: Option<&String>, origin: Origin, page_number: usize) {
        let Some(anchor) = anchor.filter(|a| !a.is_empty()) else {
            return;
        };
        match self.origins.get(anchor.as_str()) {
            None => {
                let id = AnchorId::from(anchor.as_str());
                self.anchors.pages.insert(id.clone(), page_number);
                self.origins.insert(id, origin);
            }
            Some(first) if *first == origin => {}
            Some(_) => {
                if self.options.warn_on_duplicates && self.reported.insert(AnchorId::from(anchor.as_str())) {
                    let kept = self.anchors.get(anchor).unwrap_or_default();
                    self.diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticKind::Anchor,
                            format!("duplicate anchor '{}'; keeping page {}", anchor, kept),
                        )
                        .on_page(page_number),
                    );
                }
            }
        }
    }

    fn visit_band(&mut self, placed: &PlacedBand, band: usize, prefix: &str, page_number: usize) {
        let origin = Origin {
            band,
            path: format!("{}{}", prefix, placed.band.label()),
        };
        self.record(placed.band.anchor.as_ref(), origin, page_number);
        for (_, element, measured) in placed.drawn_elements() {
            self.visit_element(element, measured, band, prefix, page_number);
        }
    }

    fn visit_element(
        &mut self,
        element: &Element,
        measured: &MeasuredElement,
        band: usize,
        prefix: &str,
        page_number: usize,
    ) {
        let path = format!("{}{}", prefix, element.id);
        self.record(
            element.anchor.as_ref(),
            Origin {
                band,
                path: path.clone(),
            },
            page_number,
        );

        for (child, child_measured) in element.children.iter().zip(&measured.children) {
            if let Some(child_measured) = child_measured {
                self.visit_element(child, child_measured, band, &format!("{}/", path), page_number);
            }
        }

        if let Some(frame) = &measured.frame {
            let frame_prefix = format!("{}/", path);
            for nested in &frame.bands {
                self.visit_band(nested, band, &frame_prefix, page_number);
            }
        }
    }
}

/// Maps every anchor on a drawn band or element to the page it landed on.
/// The first occurrence wins; later ones are reported, never fatal.
pub fn collect_anchors(
    layout: &LayoutResult,
    options: AnchorOptions,
    diagnostics: &mut Diagnostics,
) -> AnchorMap {
    let mut collector = Collector {
        options,
        anchors: AnchorMap::default(),
        origins: HashMap::new(),
        reported: HashSet::new(),
        diagnostics,
    };
    for page in &layout.pages {
        for placed in page.background.iter().chain(&page.bands) {
            let band = Arc::as_ptr(&placed.band) as usize;
            collector.visit_band(placed, band, "", page.page_number);
        }
    }
    log::debug!("Collected {} anchor(s)", collector.anchors.len());
    collector.anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Page;
    use crate::scope::Scope;
    use folio_template::{Band, BandType, PageConfig};
    use folio_types::Size;

    fn placed(band: &Arc<Band>, offset_y: f32) -> PlacedBand {
        PlacedBand {
            band: band.clone(),
            offset_y,
            x_offset: 0.0,
            width: 100.0,
            measured_height: band.height,
            elements: band
                .elements
                .iter()
                .map(|e| {
                    Some(MeasuredElement {
                        size: Size::new(e.width, e.height),
                        table: None,
                        children: Vec::new(),
                        frame: None,
                    })
                })
                .collect(),
            table_slice: None,
            scope: Scope::default(),
            column: 0,
        }
    }

    fn page(index: usize, bands: Vec<PlacedBand>) -> Page {
        Page {
            section_index: 0,
            page_index: index,
            page_number: index + 1,
            section_page_number: index + 1,
            geometry: PageConfig::default(),
            background: Vec::new(),
            bands,
        }
    }

    fn anchored(anchor: &str) -> Arc<Band> {
        let mut band = Band::new(BandType::Detail, 10.0);
        band.anchor = Some(anchor.into());
        Arc::new(band)
    }

    #[test]
    fn test_first_occurrence_wins() {
        let a = anchored("totals");
        let b = anchored("totals");
        let layout = LayoutResult {
            pages: vec![page(0, vec![placed(&a, 0.0)]), page(1, vec![placed(&b, 0.0)])],
        };
        let mut diags = Diagnostics::new();
        let anchors = collect_anchors(&layout, AnchorOptions::default(), &mut diags);
        assert_eq!(anchors.get("totals"), Some(1));
        assert_eq!(anchors.len(), 1);
        let warnings: Vec<_> = diags.of_kind(DiagnosticKind::Anchor).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("totals"));
    }

    #[test]
    fn test_duplicate_warning_can_be_disabled() {
        let a = anchored("x");
        let b = anchored("x");
        let layout = LayoutResult {
            pages: vec![page(0, vec![placed(&a, 0.0), placed(&b, 10.0)])],
        };
        let mut diags = Diagnostics::new();
        let anchors = collect_anchors(
            &layout,
            AnchorOptions {
                warn_on_duplicates: false,
            },
            &mut diags,
        );
        assert_eq!(anchors.get("x"), Some(1));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_repeated_band_is_not_a_duplicate() {
        let header = anchored("top");
        let layout = LayoutResult {
            pages: vec![page(0, vec![placed(&header, 0.0)]), page(1, vec![placed(&header, 0.0)])],
        };
        let mut diags = Diagnostics::new();
        let anchors = collect_anchors(&layout, AnchorOptions::default(), &mut diags);
        assert_eq!(anchors.get("top"), Some(1));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_element_anchor_and_hidden_elements() {
        let mut band = Band::new(BandType::Detail, 10.0);
        let mut shown = Element::new("shown", "text").at(0.0, 0.0, 10.0, 10.0);
        shown.anchor = Some("a".into());
        let mut hidden = Element::new("hidden", "text").at(0.0, 0.0, 10.0, 10.0);
        hidden.anchor = Some("b".into());
        band.elements = vec![shown, hidden];
        let band = Arc::new(band);

        let mut p = placed(&band, 0.0);
        p.elements[1] = None;
        let layout = LayoutResult {
            pages: vec![page(0, vec![]), page(1, vec![p])],
        };
        let anchors = collect_anchors(&layout, AnchorOptions::default(), &mut Diagnostics::new());
        assert_eq!(anchors.get("a"), Some(2));
        assert_eq!(anchors.get("b"), None);
    }
}
