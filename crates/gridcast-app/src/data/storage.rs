//! Key-value storage
//!
//! A narrow get/set/delete interface over named slots, so the reconciler
//! and favorites have no ambient global state and can be tested against an
//! in-memory fake. The file-backed implementation keeps one JSON document
//! per slot in the platform config directory.

use crate::config::app::NAME;
use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Get/set/delete by named slot
pub trait Storage: Send + Sync {
    /// Read a slot's raw content, `None` if the slot was never written
    fn read(&self, slot: &str) -> Result<Option<String>>;

    /// Write a slot's raw content, creating it if needed
    fn write(&self, slot: &str, content: &str) -> Result<()>;

    /// Delete a slot; deleting a missing slot is not an error
    fn delete(&self, slot: &str) -> Result<()>;
}

/// Load and deserialize a slot's JSON content
///
/// An empty slot is treated as never written.
pub fn load_slot<T: DeserializeOwned>(storage: &dyn Storage, slot: &str) -> Result<Option<T>> {
    let content = match storage.read(slot)? {
        Some(c) => c,
        None => return Ok(None),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let data = serde_json::from_str(&content)
        .map_err(|e| AppError::Storage(format!("Failed to parse slot '{slot}': {e}")))?;

    Ok(Some(data))
}

/// Serialize data to JSON and write it to a slot
pub fn save_slot<T: Serialize>(storage: &dyn Storage, slot: &str, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| AppError::Storage(format!("Failed to serialize slot '{slot}': {e}")))?;
    storage.write(slot, &content)
}

/// Get the application config directory path
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|p| p.join(NAME)).ok_or_else(|| {
        AppError::Storage(
            "Could not determine config directory. HOME environment variable may not be set."
                .to_string(),
        )
    })
}

// =============================================================================
// FileStorage - one JSON file per slot
// =============================================================================

/// File-backed storage rooted at a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage in the default config directory
    pub fn new() -> Result<Self> {
        Ok(Self::at(config_dir()?))
    }

    /// Create storage rooted at a specific directory (for testing and
    /// custom locations)
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    fn ensure_dir(&self) -> Result<()> {
        match fs::create_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) => {
                let msg = match e.kind() {
                    ErrorKind::PermissionDenied => {
                        format!("Permission denied: cannot create directory {:?}", self.dir)
                    }
                    _ => format!("Failed to create directory {:?}: {}", self.dir, e),
                };
                Err(AppError::Storage(msg))
            }
        }
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) => match e.kind() {
                ErrorKind::NotFound => Ok(None),
                ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
                    "Permission denied: cannot read {path:?}"
                ))),
                _ => Err(AppError::Storage(format!("Failed to read {path:?}: {e}"))),
            },
        }
    }

    fn write(&self, slot: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.slot_path(slot);
        match fs::write(&path, content) {
            Ok(()) => Ok(()),
            Err(e) => {
                let msg = match e.kind() {
                    ErrorKind::PermissionDenied => {
                        format!("Permission denied: cannot write to {path:?}")
                    }
                    ErrorKind::ReadOnlyFilesystem => {
                        format!("Cannot write to {path:?}: filesystem is read-only")
                    }
                    _ => format!("Failed to write to {path:?}: {e}"),
                };
                Err(AppError::Storage(msg))
            }
        }
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) => match e.kind() {
                ErrorKind::NotFound => Ok(()), // Already gone, that's fine
                ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
                    "Permission denied: cannot delete {path:?}"
                ))),
                _ => Err(AppError::Storage(format!("Failed to delete {path:?}: {e}"))),
            },
        }
    }
}

// =============================================================================
// MemoryStorage - in-memory fake for tests
// =============================================================================

/// In-memory storage backed by a map
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a slot currently exists
    pub fn contains(&self, slot: &str) -> bool {
        self.slots
            .lock()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| AppError::Storage("storage lock poisoned".to_string()))?;
        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, content: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| AppError::Storage("storage lock poisoned".to_string()))?;
        slots.insert(slot.to_string(), content.to_string());
        Ok(())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| AppError::Storage("storage lock poisoned".to_string()))?;
        slots.remove(slot);
        Ok(())
    }
}
