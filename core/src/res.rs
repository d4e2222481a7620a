// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource cache for textures and other assets
//!
//! Resources are loaded on first access and shared afterwards. The cache is
//! keyed by the resolved path *and* the requested type, so the same file can
//! be loaded as two different resource types.

use crate::BoardError;
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Something the cache can construct from a file
pub trait Resource: Any + Send + Sync + Sized {
    fn load(path: &Path) -> Result<Self, BoardError>;
}

/// Raw texture data for a piece image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Texture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Resource for Texture {
    fn load(path: &Path) -> Result<Self, BoardError> {
        let bytes = std::fs::read(path).map_err(|source| BoardError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }
}

type Shared = Arc<dyn Any + Send + Sync>;

/// Construct-once cache of resources under a root directory
#[derive(Debug)]
pub struct ResourceCache {
    root: PathBuf,
    entries: Mutex<HashMap<(PathBuf, TypeId), Shared>>,
}

impl ResourceCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Resource of type `T` at `root/segments...`, loading it on first use
    pub fn get<T: Resource>(&self, segments: &[&str]) -> Result<Arc<T>, BoardError> {
        let path = segments
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment));
        let key = (path, TypeId::of::<T>());

        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&key) {
            if let Ok(resource) = Arc::clone(existing).downcast::<T>() {
                return Ok(resource);
            }
        }

        let resource = Arc::new(T::load(&key.0)?);
        tracing::debug!(path = %key.0.display(), "Loaded resource");
        let shared: Shared = resource.clone();
        entries.insert(key, shared);
        Ok(resource)
    }

    /// Number of cached resources
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
