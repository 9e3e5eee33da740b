//! # Schema History
//!
//! Uploaded schema files persist across sessions in a single named entry of
//! device-local storage. The storage itself sits behind the `HistoryStore`
//! port so the workspace logic can be exercised against an in-memory fake,
//! while the shipped implementation serializes the whole history list to one
//! JSON file. There is no versioning and no migration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// An uploaded schema file. `name` is the uniqueness key: re-uploading a
/// file with an existing name overwrites that entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content: String,
}

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history entry is not decodable: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The persistence port for the schema history list.
pub trait HistoryStore: Send + Sync {
    /// Loads the full history list; an absent entry is an empty list.
    fn load(&self) -> Result<Vec<UploadedFile>, HistoryError>;

    /// Replaces the persisted history list.
    fn save(&self, files: &[UploadedFile]) -> Result<(), HistoryError>;
}

/// A `HistoryStore` backed by one JSON file on local disk.
#[derive(Clone, Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn load(&self) -> Result<Vec<UploadedFile>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, files: &[UploadedFile]) -> Result<(), HistoryError> {
        let content = serde_json::to_string_pretty(files)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// An in-memory `HistoryStore` for tests.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<UploadedFile>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<UploadedFile>, HistoryError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn save(&self, files: &[UploadedFile]) -> Result<(), HistoryError> {
        *self.entries.lock().unwrap() = files.to_vec();
        Ok(())
    }
}

/// The schema capture surface: the active schema text, the marker for which
/// history entry it came from, and the persisted history list.
///
/// Mutations run synchronously on the caller's thread and persist through
/// the store before returning.
pub struct SchemaWorkspace {
    store: Box<dyn HistoryStore>,
    entries: Vec<UploadedFile>,
    active_schema: String,
    active_file: Option<String>,
}

impl SchemaWorkspace {
    /// Opens a workspace over the given store, loading any persisted history.
    pub fn open(store: Box<dyn HistoryStore>) -> Result<Self, HistoryError> {
        let entries = store.load()?;
        Ok(Self {
            store,
            entries,
            active_schema: String::new(),
            active_file: None,
        })
    }

    pub fn entries(&self) -> &[UploadedFile] {
        &self.entries
    }

    pub fn active_schema(&self) -> &str {
        &self.active_schema
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    /// Records an uploaded file, makes it the active schema, and persists.
    ///
    /// An entry with the same name is overwritten in place; otherwise the
    /// file is appended.
    pub fn upload(&mut self, name: &str, content: &str) -> Result<(), HistoryError> {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.content = content.to_string(),
            None => self.entries.push(UploadedFile {
                name: name.to_string(),
                content: content.to_string(),
            }),
        }
        self.active_schema = content.to_string();
        self.active_file = Some(name.to_string());
        self.store.save(&self.entries)
    }

    /// Activates a history entry by name, loading its content as the active
    /// schema. Returns `false` when no entry carries that name.
    pub fn select(&mut self, name: &str) -> bool {
        match self.entries.iter().find(|entry| entry.name == name) {
            Some(entry) => {
                self.active_schema = entry.content.clone();
                self.active_file = Some(entry.name.clone());
                true
            }
            None => false,
        }
    }

    /// Removes a history entry and persists. Removing the entry that is
    /// currently active clears the active schema text and the marker.
    pub fn remove(&mut self, name: &str) -> Result<bool, HistoryError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        if self.entries.len() == before {
            return Ok(false);
        }
        if self.active_file.as_deref() == Some(name) {
            self.active_schema.clear();
            self.active_file = None;
        }
        self.store.save(&self.entries)?;
        Ok(true)
    }

    /// Replaces the active schema text with manually edited content. The
    /// text no longer mirrors any history entry, so the marker is cleared.
    pub fn set_schema_text(&mut self, content: &str) {
        self.active_schema = content.to_string();
        self.active_file = None;
    }
}
