//! Recoverable problems collected during layout and rendering.
//!
//! Nothing in here aborts a render. Callers inspect the collected list and
//! decide whether warnings should be treated as failures.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Missing or malformed data source, bad schema reference.
    TemplateData,
    /// Unreachable, timed out or undecodable resource.
    Resource,
    /// Content that could not be paginated cleanly (oversized rows, clipping).
    Pagination,
    /// A plugin broke its measure/render contract (negative or NaN sizes).
    Contract,
    /// Element properties failed structural validation.
    Validation,
    /// Duplicate or unresolved anchors.
    Anchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            element_id: None,
            page_number: None,
        }
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(kind, message)
        }
    }

    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn on_page(mut self, page_number: usize) -> Self {
        self.page_number = Some(page_number);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}/{:?}]", self.severity, self.kind)?;
        if let Some(page) = self.page_number {
            write!(f, " page {}", page)?;
        }
        if let Some(id) = &self.element_id {
            write!(f, " element '{}'", id)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// An append-only collector. Every pushed entry is also logged.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => log::info!("{}", diagnostic),
            Severity::Warning | Severity::Error => log::warn!("{}", diagnostic),
        }
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|d| matches!(d.severity, Severity::Warning | Severity::Error))
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let d = Diagnostic::warning(DiagnosticKind::Resource, "timed out")
            .with_element("logo")
            .on_page(2);
        let text = d.to_string();
        assert!(text.contains("page 2"));
        assert!(text.contains("'logo'"));
        assert!(text.contains("timed out"));
    }

    #[test]
    fn test_filter_by_kind() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning(DiagnosticKind::Anchor, "dup"));
        diags.push(Diagnostic::warning(DiagnosticKind::Resource, "404"));
        assert_eq!(diags.of_kind(DiagnosticKind::Anchor).count(), 1);
        assert!(diags.has_warnings());
    }
}
