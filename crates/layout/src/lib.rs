//! Band layout and pagination.
//!
//! [`LayoutEngine`] walks a template's sections, binds bands to data, asks an
//! [`ElementMeasurer`] for element sizes and produces a [`LayoutResult`]: the
//! ordered pages with every placed band and the scope it was bound to.
//! [`collect_anchors`] then maps anchor ids to page numbers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Section {section}: invalid page geometry ({reason})")]
    InvalidGeometry { section: usize, reason: String },
    #[error("Layout exceeded the limit of {0} pages")]
    PageLimitExceeded(usize),
}

pub mod algorithms;
pub mod anchors;
pub mod config;
mod engine;
pub mod measure;
pub mod output;
pub mod scope;

pub use anchors::{AnchorMap, AnchorOptions, collect_anchors};
pub use config::LayoutConfig;
pub use engine::LayoutEngine;
pub use measure::{ElementMeasure, ElementMeasurer, MeasureError, MeasureRequest, TableMetrics};
pub use output::{
    FrameLayout, LayoutResult, MeasuredElement, Page, PageGeometry, PlacedBand, TableSlice,
};
pub use scope::Scope;

#[cfg(test)]
mod test_utils;
