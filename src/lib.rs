//! folio turns a band-based JSON template and a JSON payload into a PDF.
//!
//! The work happens in two passes. Layout binds bands to data, measures
//! elements through their plugins and paginates; anchors are then mapped
//! to page numbers. The render pass draws every page with the page totals
//! and anchor targets known.
//!
//! ```no_run
//! use folio::{PipelineBuilder, RenderOptions};
//! use serde_json::json;
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_template_file("invoice.json")?
//!     .build()?;
//! let output = pipeline.render_sync(json!({"lines": []}), &RenderOptions::default())?;
//! std::fs::write("invoice.pdf", &output.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{DocumentPipeline, PipelineBuilder, PipelineConfig, RenderOptions, RenderOutput};

pub use folio_layout as layout;
pub use folio_plugins as plugins;
pub use folio_render_core as render;
pub use folio_resource as resource;
pub use folio_style as style;
pub use folio_template as template;
pub use folio_types as types;

pub use folio_layout::{AnchorOptions, LayoutConfig};
pub use folio_template::Template;
pub use folio_types::{Diagnostic, DiagnosticKind, Severity};
