//! Loading of document-referenced resources, primarily profile photos.
//!
//! The engine never touches the filesystem directly; every byte source
//! goes through a [`ResourceProvider`] so callers decide where image data
//! actually lives (memory, disk, an upload store).

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;
use vitae_types::SharedData;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

pub trait ResourceProvider: Send + Sync + Debug {
    /// Loads a resource by the path or URI the document references.
    fn load(&self, path: &str) -> Result<SharedData, ResourceError>;

    /// Whether `path` can be loaded.
    fn exists(&self, path: &str) -> bool;
}

/// Pre-populated in-memory storage. Works everywhere; the usual choice in
/// tests and for callers that fetch uploads themselves.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    entries: RwLock<HashMap<String, SharedData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut entries = self.entries.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        entries.insert(path, Arc::new(data));
        Ok(())
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedData, ResourceError> {
        self.entries
            .read()
            .map_err(|_| ResourceError::LoadFailed {
                path: path.to_string(),
                message: "resource store lock poisoned".to_string(),
            })?
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.entries.read().map(|e| e.contains_key(path)).unwrap_or(false)
    }
}

/// Loads resources relative to a base directory. Absolute paths and paths
/// that would escape the base directory are rejected.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base: PathBuf,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self { base: base.as_ref().to_path_buf() }
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }
        if Path::new(path)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return None;
        }
        Some(self.base.join(path))
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedData, ResourceError> {
        let full = self
            .resolve(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside base path)", path)))?;
        std::fs::read(&full).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed { path: path.to_string(), message: e.to_string() }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.exists()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn memory_provider_round_trips() {
        let provider = InMemoryResourceProvider::new();
        provider.add("photo.png", vec![1, 2, 3]).unwrap();
        assert!(provider.exists("photo.png"));
        assert_eq!(&*provider.load("photo.png").unwrap(), &[1, 2, 3]);
        assert!(matches!(provider.load("other.png"), Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn filesystem_provider_loads_relative_paths() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.bin"), b"data").unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.exists("a.bin"));
        assert_eq!(&*provider.load("a.bin").unwrap(), b"data");
    }

    #[test]
    fn filesystem_provider_blocks_escapes() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.load("../secret").is_err());
        assert!(provider.load("/etc/passwd").is_err());
        assert!(!provider.exists("foo/../../bar"));
    }
}
