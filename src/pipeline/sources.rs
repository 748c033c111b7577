//! Static image sources of a template, for prefetching before layout.

use folio_template::{Band, Element, Template};
use itertools::Itertools;

/// Every literal `src` of an image element, including container children
/// and frame bands, in document order without duplicates. Data-bound
/// sources are only known during layout and are not listed.
pub(crate) fn image_sources(template: &Template) -> Vec<&str> {
    let mut sources = Vec::new();
    for section in &template.sections {
        collect_bands(&section.bands, &mut sources);
    }
    sources.into_iter().unique().collect()
}

fn collect_bands<'t>(bands: &'t [Band], out: &mut Vec<&'t str>) {
    for band in bands.iter().filter(|b| b.is_visible()) {
        collect_elements(&band.elements, out);
    }
}

fn collect_elements<'t>(elements: &'t [Element], out: &mut Vec<&'t str>) {
    for element in elements.iter().filter(|e| e.is_visible()) {
        if element.kind == "image"
            && let Some(src) = element.properties.get("src").and_then(|v| v.as_str())
            && !src.is_empty()
        {
            out.push(src);
        }
        collect_elements(&element.children, out);
        collect_bands(&element.bands, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_nested_sources_once() {
        let template = Template::from_value(json!({
            "sections": [{
                "bands": [
                    {"type": "pageHeader", "height": 40, "elements": [
                        {"id": "logo", "type": "image", "properties": {"src": "logo.png"}},
                        {"id": "box", "type": "container", "children": [
                            {"id": "badge", "type": "image", "properties": {"src": "badge.png"}}
                        ]}
                    ]},
                    {"type": "detail", "height": 40, "elements": [
                        {"id": "frame", "type": "frame", "bands": [
                            {"type": "detail", "height": 10, "elements": [
                                {"id": "again", "type": "image", "properties": {"src": "logo.png"}},
                                {"id": "bound", "type": "image", "properties": {"field": "photo"}}
                            ]}
                        ]}
                    ]},
                    {"type": "summary", "height": 40, "condition": false, "elements": [
                        {"id": "hidden", "type": "image", "properties": {"src": "hidden.png"}}
                    ]}
                ]
            }]
        }))
        .unwrap();
        assert_eq!(image_sources(&template), vec!["logo.png", "badge.png"]);
    }
}
