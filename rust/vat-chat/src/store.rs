//! Persistence for [`Memory`].
//!
//! Stores always read and write the whole document. A failed save leaves the
//! in-memory state untouched; the session simply tries again on its next
//! save tick.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use crate::memory::Memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed memory document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads and saves the memory document.
pub trait MemoryStore {
    fn load(&self) -> Result<Memory, StoreError>;

    fn save(&self, memory: &Memory) -> Result<(), StoreError>;
}

/// A JSON document on disk.
///
/// A missing file loads as empty memory. Saves write a sibling temporary
/// file and rename it over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileStore {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl MemoryStore for JsonFileStore {
    fn load(&self) -> Result<Memory, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Memory::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, memory: &Memory) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temporary = self.temporary_path();
        fs::write(&temporary, serde_json::to_vec_pretty(memory)?)?;
        fs::rename(&temporary, &self.path)?;
        Ok(())
    }
}

/// Keeps the last saved document in process memory.
#[derive(Debug, Default)]
pub struct VolatileStore {
    saved: Mutex<Memory>,
}

impl VolatileStore {
    pub fn new(memory: Memory) -> Self {
        VolatileStore {
            saved: Mutex::new(memory),
        }
    }

    /// A copy of the last saved document.
    pub fn snapshot(&self) -> Memory {
        self.saved.lock().clone()
    }
}

impl MemoryStore for VolatileStore {
    fn load(&self) -> Result<Memory, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, memory: &Memory) -> Result<(), StoreError> {
        *self.saved.lock() = memory.clone();
        Ok(())
    }
}
