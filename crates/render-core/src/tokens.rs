//! Page tokens in text content: `{{_pageNumber}}`, `{{_totalPages}}`,
//! `{{_sectionPageNumber}}` and `{{_pageRef:ANCHOR}}`.
//!
//! Replacement is literal. Any other `{{...}}` is left untouched.

use folio_layout::{AnchorMap, Scope};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken<'t> {
    PageNumber,
    TotalPages,
    SectionPageNumber,
    PageRef(&'t str),
}

impl<'t> PageToken<'t> {
    fn parse(inner: &'t str) -> Option<Self> {
        match inner.trim() {
            "_pageNumber" => Some(PageToken::PageNumber),
            "_totalPages" => Some(PageToken::TotalPages),
            "_sectionPageNumber" => Some(PageToken::SectionPageNumber),
            other => other
                .strip_prefix("_pageRef:")
                .map(|id| PageToken::PageRef(id.trim())),
        }
    }
}

/// Replaces every recognized token in `text` with `value(token)`.
pub fn substitute<'t>(text: &'t str, mut value: impl FnMut(PageToken<'t>) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let inner = &rest[start + 2..start + 2 + len];
        out.push_str(&rest[..start]);
        match PageToken::parse(inner) {
            Some(token) => out.push_str(&value(token)),
            None => out.push_str(&rest[start..start + 4 + len]),
        }
        rest = &rest[start + 4 + len..];
    }
    out.push_str(rest);
    out
}

/// Placeholder for values unknown during measurement.
const MEASURE_PLACEHOLDER: &str = "999";

/// Tokens as far as they are known while measuring: the page counters are
/// bound, totals and page references are not.
pub fn substitute_for_measure(text: &str, scope: &Scope) -> String {
    substitute(text, |token| match token {
        PageToken::PageNumber => scope.page_number.to_string(),
        PageToken::SectionPageNumber => scope.section_page_number.to_string(),
        PageToken::TotalPages | PageToken::PageRef(_) => MEASURE_PLACEHOLDER.to_string(),
    })
}

/// The data and page context of one placed band in the render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderScope<'a> {
    pub scope: &'a Scope,
    pub total_pages: usize,
    pub anchors: &'a AnchorMap,
    pub root: &'a Value,
}

impl RenderScope<'_> {
    /// Replaces page tokens with final values. Unknown anchors render as "?".
    pub fn substitute(&self, text: &str) -> String {
        substitute(text, |token| match token {
            PageToken::PageNumber => self.scope.page_number.to_string(),
            PageToken::TotalPages => self.total_pages.to_string(),
            PageToken::SectionPageNumber => self.scope.section_page_number.to_string(),
            PageToken::PageRef(id) => match self.anchors.get(id) {
                Some(page) => page.to_string(),
                None => {
                    log::warn!("Page reference to unknown anchor '{}'", id);
                    "?".to_string()
                }
            },
        })
    }

    pub fn field_text(&self, path: &str) -> Option<String> {
        self.scope.field_text(path, self.root)
    }

    pub fn resolve(&self, path: &str) -> Option<&Value> {
        self.scope.resolve(path, self.root)
    }
}
