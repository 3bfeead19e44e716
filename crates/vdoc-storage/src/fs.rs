//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documents from a source tree and
//! writing transformed output to a mirrored output tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::storage::{DocStorage, StorageError, validate_path};

/// Filesystem storage implementation.
///
/// Reads are rooted at the source directory, writes at the output
/// directory. Parent directories in the output tree are created on demand.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use vdoc_storage::{DocStorage, FsStorage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"), PathBuf::from("_build"));
/// let content = storage.read(Path::new("intro.rst"))?;
/// ```
pub struct FsStorage {
    /// Root directory for source documents.
    source_dir: PathBuf,
    /// Root directory for transformed output.
    output_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing source documents
    /// * `output_dir` - Root directory for transformed output
    #[must_use]
    pub fn new(source_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            source_dir,
            output_dir,
        }
    }

    /// Compute the output path for a relative path, creating parents.
    fn prepare_output_path(&self, path: &Path) -> Result<PathBuf, StorageError> {
        let full_path = self.output_dir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent.to_path_buf(), e))?;
        }
        Ok(full_path)
    }
}

impl DocStorage for FsStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        validate_path(path)?;
        let full_path = self.source_dir.join(path);
        fs::read_to_string(&full_path).map_err(|e| StorageError::io(full_path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        validate_path(path)?;
        let full_path = self.prepare_output_path(path)?;
        fs::write(&full_path, content).map_err(|e| StorageError::io(full_path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        validate_path(path).is_ok() && self.source_dir.join(path).is_file()
    }

    fn copy_matching(&self, pattern: &str) -> Result<usize, StorageError> {
        let full_pattern = self.source_dir.join(pattern);
        let matches =
            glob::glob(&full_pattern.to_string_lossy()).map_err(|e| {
                StorageError::InvalidPattern {
                    pattern: pattern.to_owned(),
                    source: e,
                }
            })?;

        let mut copied = 0;
        for entry in matches {
            let source_path = match entry {
                Ok(p) => p,
                Err(e) => {
                    return Err(StorageError::io(e.path().to_path_buf(), e.into_error()));
                }
            };
            if !source_path.is_file() {
                continue;
            }
            // Matched paths are always under source_dir since the pattern is.
            let relative = source_path
                .strip_prefix(&self.source_dir)
                .map_err(|_| StorageError::InvalidPath(source_path.clone()))?;
            let dest = self.prepare_output_path(relative)?;
            fs::copy(&source_path, &dest).map_err(|e| StorageError::io(source_path, e))?;
            copied += 1;
        }

        debug!(pattern, copied, "copied assets");
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn make_storage(temp: &TempDir) -> FsStorage {
        FsStorage::new(temp.path().join("src"), temp.path().join("out"))
    }

    #[test]
    fn test_read_existing_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/intro.rst"), "Introduction\n").unwrap();

        let storage = make_storage(&temp);
        let content = storage.read(Path::new("intro.rst")).unwrap();

        assert_eq!(content, "Introduction\n");
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();

        let storage = make_storage(&temp);
        let err = storage.read(Path::new("missing.rst")).unwrap_err();

        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_read_rejects_parent_traversal() {
        let temp = TempDir::new().unwrap();
        let storage = make_storage(&temp);

        let err = storage.read(Path::new("../outside.rst")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let storage = make_storage(&temp);

        storage
            .write(Path::new("chapters/storage.rst"), "content\n")
            .unwrap();

        let written = fs::read_to_string(temp.path().join("out/chapters/storage.rst")).unwrap();
        assert_eq!(written, "content\n");
    }

    #[test]
    fn test_exists() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/intro.rst"), "x").unwrap();

        let storage = make_storage(&temp);
        assert!(storage.exists(Path::new("intro.rst")));
        assert!(!storage.exists(Path::new("missing.rst")));
    }

    #[test]
    fn test_copy_matching_mirrors_tree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/images")).unwrap();
        fs::write(temp.path().join("src/images/network1.png"), [1u8, 2, 3]).unwrap();
        fs::write(temp.path().join("src/images/network2.png"), [4u8, 5]).unwrap();
        fs::write(temp.path().join("src/images/readme.txt"), "skip").unwrap();

        let storage = make_storage(&temp);
        let copied = storage.copy_matching("images/*.png").unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read(temp.path().join("out/images/network1.png")).unwrap(),
            vec![1u8, 2, 3]
        );
        assert!(!temp.path().join("out/images/readme.txt").exists());
    }

    #[test]
    fn test_copy_matching_no_matches() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();

        let storage = make_storage(&temp);
        let copied = storage.copy_matching("*.png").unwrap();

        assert_eq!(copied, 0);
    }

    #[test]
    fn test_copy_matching_invalid_pattern() {
        let temp = TempDir::new().unwrap();
        let storage = make_storage(&temp);

        let err = storage.copy_matching("images/[").unwrap_err();
        assert!(matches!(err, StorageError::InvalidPattern { .. }));
    }
}
