use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::parse::WordList;

/// Errors surfaced by word list sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("word list {0:?} not found")]
    NotFound(String),

    #[error("invalid word list name {0:?}")]
    InvalidName(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("connection error: {0}")]
    Connection(String),
}

/// Source of named word lists.
pub trait WordListRepository: Send + Sync {
    /// Names of all available lists, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be enumerated.
    fn list_names(&self) -> Result<Vec<String>, StorageError>;

    /// Raw text of a list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    fn read_raw(&self, name: &str) -> Result<String, StorageError>;

    /// Reads and parses a list.
    ///
    /// # Errors
    ///
    /// See [`WordListRepository::read_raw`].
    fn load(&self, name: &str) -> Result<WordList, StorageError> {
        let text = self.read_raw(name)?;
        Ok(WordList::parse(name, &text))
    }
}

//
// ─── DIRECTORY ─────────────────────────────────────────────────────────────────
//

/// Lists stored as files in a single directory; the file name is the list name.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    root: PathBuf,
}

impl DirectoryRepository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let plain = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && Path::new(name).file_name().is_some_and(|f| f == name);
        if !plain {
            return Err(StorageError::InvalidName(name.to_owned()));
        }
        Ok(self.root.join(name))
    }
}

impl WordListRepository for DirectoryRepository {
    fn list_names(&self) -> Result<Vec<String>, StorageError> {
        let io_err = |source: io::Error| StorageError::Io {
            path: self.root.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_raw(&self, name: &str) -> Result<String, StorageError> {
        let path = self.path_for(name)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_owned()))
            }
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

//
// ─── IN MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    lists: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces a list's raw text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(name.into(), text.into());
        Ok(())
    }
}

impl WordListRepository for InMemoryRepository {
    fn list_names(&self) -> Result<Vec<String>, StorageError> {
        let guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut names: Vec<String> = guard.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn read_raw(&self, name: &str) -> Result<String, StorageError> {
        let guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_owned()))
    }
}
