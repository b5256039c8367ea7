//! Storage port for the persisted widget list.
//!
//! The store never talks to a storage medium directly; hosts inject a
//! [`LayoutStorage`] at construction. The payload is an opaque string
//! produced by [`codec::encode`](crate::codec::encode).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hearth_core::StorageError;

/// Load/save port injected into the layout store.
pub trait LayoutStorage {
    /// Read the last saved payload. `Ok(None)` means nothing was saved yet.
    fn load(&mut self) -> Result<Option<String>, StorageError>;

    /// Replace the saved payload.
    fn save(&mut self, payload: &str) -> Result<(), StorageError>;
}

impl<S: LayoutStorage + ?Sized> LayoutStorage for Box<S> {
    fn load(&mut self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        (**self).save(payload)
    }
}

/// In-memory storage, for tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    payload: Option<String>,
    saves: usize,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-filled with a payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            saves: 0,
        }
    }

    /// The current payload.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LayoutStorage for MemoryStorage {
    fn load(&mut self) -> Result<Option<String>, StorageError> {
        Ok(self.payload.clone())
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        self.payload = Some(payload.to_string());
        self.saves += 1;
        Ok(())
    }
}

/// Storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutStorage for FileStorage {
    fn load(&mut self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write a sibling file and rename it into place.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
