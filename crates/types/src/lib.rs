pub mod color;
pub mod diagnostics;
pub mod geometry;
pub mod ids;

pub use color::Color;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use geometry::{Point, Rect, Size};
pub use ids::{AnchorId, SourceKey};
