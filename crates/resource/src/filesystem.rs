//! Filesystem resource provider.
//!
//! Every resolved path must stay inside the base directory. Absolute paths
//! and `..` escapes are rejected before touching the disk.

use folio_traits::{ResourceError, ResourceProvider, SharedBytes};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Loads resources relative to a base directory, usually the directory that
/// holds the template file.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base_path = base_path.as_ref().to_path_buf();
        let canonical_base = base_path.canonicalize().ok();
        Self {
            base_path,
            canonical_base,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` when `path` would escape the base directory.
    fn resolve_contained(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let joined = self.base_path.join(relative);
        match (joined.canonicalize(), &self.canonical_base) {
            // Symlinks may still point outside the base.
            (Ok(canonical), Some(base)) => canonical.starts_with(base).then_some(canonical),
            _ => Some(joined),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedBytes, ResourceError> {
        let full_path = self
            .resolve_contained(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside base directory)", path)))?;

        log::debug!("Reading resource '{}' from {}", path, full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_contained(path).is_some_and(|p| p.is_file())
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
