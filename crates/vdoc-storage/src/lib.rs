//! Storage abstraction for the vdoc preprocessor.
//!
//! This crate provides a [`DocStorage`] trait for abstracting document
//! reading and writing from the underlying storage backend. This enables:
//!
//! - **Unit testing** the pipeline without touching the real filesystem
//! - **Clean separation** between directive processing and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DocStorage`] trait with `read()`, `write()`, `exists()`, and
//!   `copy_matching()` methods
//! - [`FsStorage`] implementation rooted at a source and an output tree
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//! - List-file parsing for build manifests and asset copy lists
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use vdoc_storage::{DocStorage, FsStorage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"), PathBuf::from("_build"));
//! let content = storage.read(Path::new("intro.rst"))?;
//! storage.write(Path::new("intro.rst"), &content)?;
//! ```

mod fs;
mod list;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
pub use list::{load_list, parse_list};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{DocStorage, StorageError};
