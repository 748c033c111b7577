//! Resource loading abstraction.
//!
//! Lets the engine read images and other binary inputs without being tied
//! to the filesystem. Remote and data-URI sources are handled one level up,
//! in `folio-resource`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading. `Clone` so that a single failed load can
/// be handed to every waiter on a shared in-flight request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("Timed out after {millis}ms fetching '{url}'")]
    Timeout { url: String, millis: u128 },

    #[error("Remote resources are disabled: {0}")]
    RemoteDisabled(String),

    #[error("Image generation failed: {0}")]
    Generation(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Reference-counted resource bytes.
pub type SharedBytes = Arc<Vec<u8>>;

/// Loads resources by path relative to some root.
///
/// - `FilesystemResourceProvider` (in `folio-resource`) reads from disk.
/// - [`InMemoryResourceProvider`] serves pre-populated bytes.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, path: &str) -> Result<SharedBytes, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Base path used to resolve relative resources, if any.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// A resource provider backed by a map. Useful for tests and for callers
/// that ship their assets inside the binary.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedBytes>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a resource.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path, Arc::new(data));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedBytes, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_load() {
        let provider = InMemoryResourceProvider::new();
        provider.add("logo.png", b"\x89PNG".to_vec()).unwrap();
        assert_eq!(&*provider.load("logo.png").unwrap(), b"\x89PNG");
        assert!(provider.exists("logo.png"));
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_not_found() {
        let provider = InMemoryResourceProvider::new();
        assert!(matches!(provider.load("missing.png"), Err(ResourceError::NotFound(_))));
        assert!(provider.is_empty());
    }

    #[test]
    fn test_overwrite() {
        let provider = InMemoryResourceProvider::new();
        provider.add("a", b"one".to_vec()).unwrap();
        provider.add("a", b"two".to_vec()).unwrap();
        assert_eq!(&*provider.load("a").unwrap(), b"two");
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = ResourceError::Timeout {
            url: "https://example.com/a.png".into(),
            millis: 10_000,
        };
        assert!(err.to_string().contains("10000ms"));
        let io: ResourceError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(matches!(io, ResourceError::Io(_)));
    }
}
