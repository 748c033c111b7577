//! Core rendering abstractions.
//!
//! This crate sits between the layout engine and a page-format backend:
//! - `ElementPlugin` and `PluginRegistry`, the per-element-type contract
//! - `PageSurface`/`DocumentSurface`, the drawing seam a backend implements
//! - `PageRenderer`, the second pass that draws a finished layout
//! - coordinate transform, fit box and base-14 font metrics helpers

mod error;
pub mod fit;
pub mod font;
mod plugin;
mod registry;
mod render;
mod surface;
pub mod testing;
pub mod tokens;
pub mod transform;

pub use error::{RenderError, ValidationError};
pub use fit::{FitMode, FitResult, fit_box};
pub use font::Base14Font;
pub use plugin::{ElementPlugin, MeasureContext, Props, PropsExt, RenderContext, merge_defaults};
pub use registry::PluginRegistry;
pub use render::PageRenderer;
pub use surface::{DocumentSurface, PageSurface, TextRun};
pub use tokens::RenderScope;
pub use transform::{to_page_rect, to_page_space};
