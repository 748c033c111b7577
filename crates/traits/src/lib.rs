pub mod generator;
pub mod resource;

pub use generator::ImageGenerator;
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedBytes};
