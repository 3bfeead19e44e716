//! Storage trait and error type.
//!
//! Provides the core [`DocStorage`] trait for abstracting document reading
//! and writing, along with [`StorageError`] for unified error handling
//! across backends.
//!
//! All path parameters are **relative paths** within the source tree
//! (e.g., `intro.rst`, `snippets/zfsprimer.rst`). Backends map them to
//! their internal representation; writes land under the mirrored relative
//! path in the output tree.

use std::path::{Path, PathBuf};

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Referenced file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Underlying I/O failure.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Path escapes the storage root or is otherwise unusable.
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Copy-list entry is not a valid glob pattern.
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// Underlying pattern error.
        #[source]
        source: glob::PatternError,
    },
}

impl StorageError {
    /// Create an I/O error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// Storage abstraction for document reading and writing.
///
/// Implementations read source documents from a source tree and persist
/// transformed output under the mirrored relative path in an output tree.
pub trait DocStorage: Send + Sync {
    /// Read full content of a source document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the document doesn't exist,
    /// or another variant if it can't be read.
    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Write transformed content under the mirrored output path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the content can't be persisted.
    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError>;

    /// Check whether a source document exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &Path) -> bool;

    /// Copy every source file matching a glob pattern to the output tree,
    /// byte for byte. Returns the number of files copied.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidPattern`] for malformed patterns, or
    /// an I/O variant if a matched file can't be copied.
    fn copy_matching(&self, pattern: &str) -> Result<usize, StorageError>;
}

/// Reject paths containing parent directory components (`..`).
///
/// Prevents path traversal out of the storage roots
/// (e.g., `../../../etc/passwd`).
pub(crate) fn validate_path(path: &Path) -> Result<(), StorageError> {
    let has_parent_dir = path
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir));

    if has_parent_dir {
        return Err(StorageError::InvalidPath(path.to_path_buf()));
    }
    Ok(())
}
