//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use glob::Pattern;

use crate::storage::{DocStorage, StorageError, validate_path};

/// Mock storage for testing.
///
/// Stores source documents in memory and records writes. Use the builder
/// methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use vdoc_storage::{DocStorage, MockStorage};
///
/// let storage = MockStorage::new()
///     .with_file("intro.rst", "Introduction\n");
///
/// let content = storage.read(Path::new("intro.rst")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    sources: RwLock<HashMap<PathBuf, String>>,
    written: RwLock<HashMap<PathBuf, String>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source document with the given path and content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.sources
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Get content written for a path, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn written(&self, path: impl AsRef<Path>) -> Option<String> {
        self.written.read().unwrap().get(path.as_ref()).cloned()
    }

    /// Number of documents written so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.written.read().unwrap().len()
    }
}

impl DocStorage for MockStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        validate_path(path)?;
        self.sources
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        validate_path(path)?;
        self.written
            .write()
            .unwrap()
            .insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.sources.read().unwrap().contains_key(path)
    }

    fn copy_matching(&self, pattern: &str) -> Result<usize, StorageError> {
        let pattern = Pattern::new(pattern).map_err(|e| StorageError::InvalidPattern {
            pattern: pattern.to_owned(),
            source: e,
        })?;

        let matched: Vec<(PathBuf, String)> = self
            .sources
            .read()
            .unwrap()
            .iter()
            .filter(|(path, _)| pattern.matches_path(path))
            .map(|(path, content)| (path.clone(), content.clone()))
            .collect();

        let copied = matched.len();
        let mut written = self.written.write().unwrap();
        for (path, content) in matched {
            written.insert(path, content);
        }
        Ok(copied)
    }
}
