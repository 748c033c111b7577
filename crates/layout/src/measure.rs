//! The measurement seam between the layout engine and element renderers.

use crate::scope::Scope;
use async_trait::async_trait;
use folio_style::ResolvedStyle;
use folio_template::Element;
use folio_types::{DiagnosticKind, Size};
use serde_json::Value;
use std::ops::Range;
use thiserror::Error;

/// Everything an element needs to report its size.
pub struct MeasureRequest<'a> {
    /// The element's declared box.
    pub available: Size,
    pub style: &'a ResolvedStyle,
    pub scope: &'a Scope,
    pub root: &'a Value,
}

/// Row metrics of a table, used to split it at row boundaries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableMetrics {
    pub header_height: f32,
    pub row_heights: Vec<f32>,
    /// Re-emit the header row on every continuation.
    pub header_repeat: bool,
}

impl TableMetrics {
    pub fn rows_height(&self, rows: Range<usize>) -> f32 {
        self.row_heights.get(rows).map_or(0.0, |r| r.iter().sum())
    }

    pub fn total_height(&self) -> f32 {
        self.header_height + self.rows_height(0..self.row_heights.len())
    }

    /// Replaces negative or non-finite heights with zero.
    pub fn sanitized(mut self) -> (Self, bool) {
        let fix = |v: &mut f32| {
            let bad = !v.is_finite() || *v < 0.0;
            if bad {
                *v = 0.0;
            }
            bad
        };
        let mut clamped = fix(&mut self.header_height);
        for h in &mut self.row_heights {
            clamped |= fix(h);
        }
        (self, clamped)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementMeasure {
    pub size: Size,
    pub table: Option<TableMetrics>,
}

impl ElementMeasure {
    pub fn fixed(size: Size) -> Self {
        Self { size, table: None }
    }

    /// The element's own declared box.
    pub fn declared(element: &Element) -> Self {
        Self::fixed(Size::new(element.width, element.height))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct MeasureError {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl MeasureError {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Reports the size an element occupies. May suspend on I/O; the engine
/// awaits every call before moving its cursor.
#[async_trait]
pub trait ElementMeasurer: Send + Sync {
    async fn measure(
        &self,
        element: &Element,
        request: &MeasureRequest<'_>,
    ) -> Result<ElementMeasure, MeasureError>;
}
