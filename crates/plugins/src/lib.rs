//! The built-in element plugins.
//!
//! [`builtin_registry`] assembles a [`PluginRegistry`] with one plugin per
//! element type; applications add their own with `PluginRegistry::register`.

mod barcode;
mod chart;
mod color;
mod container;
mod frame;
mod image;
mod line;
mod list;
mod shape;
mod table;
mod text;

#[cfg(test)]
mod test_utils;

pub use barcode::BarcodePlugin;
pub use chart::ChartPlugin;
pub use container::ContainerPlugin;
pub use frame::FramePlugin;
pub use self::image::ImagePlugin;
pub use line::LinePlugin;
pub use list::ListPlugin;
pub use shape::ShapePlugin;
pub use table::TablePlugin;
pub use text::{TextBlock, TextPlugin, wrap_lines};

use folio_render_core::PluginRegistry;
use folio_resource::ResourceCaches;
use std::sync::Arc;

/// Registers every built-in plugin on `registry`.
pub fn register_builtins(registry: &mut PluginRegistry) {
    registry.register(Arc::new(TextPlugin));
    registry.register(Arc::new(ImagePlugin));
    registry.register(Arc::new(LinePlugin));
    registry.register(Arc::new(ShapePlugin));
    registry.register(Arc::new(ContainerPlugin));
    registry.register(Arc::new(TablePlugin));
    registry.register(Arc::new(ListPlugin));
    registry.register(Arc::new(FramePlugin));
    registry.register(Arc::new(BarcodePlugin));
    registry.register(Arc::new(ChartPlugin));
}

/// A registry holding all built-in plugins.
pub fn builtin_registry(resources: Arc<ResourceCaches>) -> PluginRegistry {
    let mut registry = PluginRegistry::new(resources);
    register_builtins(&mut registry);
    registry
}
