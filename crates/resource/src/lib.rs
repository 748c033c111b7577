//! Resource loading for folio.
//!
//! - [`ResourceSource`] classifies a source string (data URI, URL or path).
//! - [`ResourceLoader`] fetches bytes from any of them.
//! - [`SingleFlightCache`] shares one in-flight load between concurrent callers.
//! - [`ResourceCaches`] bundles the image, barcode and chart caches.

mod cache;
mod caches;
mod filesystem;
mod loaded;
mod loader;
mod sniff;
mod source;

pub use cache::SingleFlightCache;
pub use caches::ResourceCaches;
pub use filesystem::FilesystemResourceProvider;
pub use loaded::LoadedImage;
pub use loader::{ResourceConfig, ResourceFetcher, ResourceLoader};
pub use sniff::{ImageFormat, sniff_format};
pub use source::ResourceSource;

pub use folio_traits::{
    ImageGenerator, InMemoryResourceProvider, ResourceError, ResourceProvider, SharedBytes,
};
