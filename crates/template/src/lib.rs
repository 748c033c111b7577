//! The declarative template model.
//!
//! A [`Template`] is deserialized from camelCase JSON and never mutated by
//! the layout engine. Bands and elements are owned recursive trees: frames
//! carry their own nested bands and containers their own child elements.

pub mod band;
pub mod data;
pub mod element;
pub mod error;
pub mod page;
pub mod template;

pub use band::{Band, BandType, ColumnConfig};
pub use data::{DataPath, display_value, lookup};
pub use element::Element;
pub use error::TemplateError;
pub use page::{PageConfig, PartialMargins, PartialPageConfig};
pub use template::{FontDeclaration, Section, Template};
