//! PDF output for folio using lopdf.
//!
//! [`LopdfDocument`] implements the render-core surfaces: pages are
//! accumulated as content streams in an in-memory `lopdf::Document` and
//! serialized by `finish`. Text uses the base-14 fonts with WinAnsi
//! encoding, so no font program is embedded.

mod content;
mod document;
mod images;

pub use document::LopdfDocument;
