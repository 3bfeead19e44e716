//! Directive transformation pipeline for the vdoc preprocessor.
//!
//! Source documents carry three author-facing directives that are resolved
//! before the tree is handed to the external documentation builder:
//!
//! - `#include <path>`: recursive file inclusion with indentation
//!   propagation
//! - `#ifdef <label>` / `#endif <label>`: tag-conditional blocks
//! - `%token%`: placeholder substitution, width-preserving inside table
//!   rows
//!
//! # Architecture
//!
//! [`Pipeline`] runs the three stages strictly in sequence per file:
//! include expansion (recursing into the full pipeline for each included
//! file), conditional filtering over the expanded buffer, then
//! substitution. The stages are also exposed directly
//! ([`filter_conditionals`], [`substitute`]) for callers that already hold
//! an expanded buffer.
//!
//! Processing is single-threaded and synchronous; every error is fatal to
//! the run.
//!
//! # Example
//!
//! ```ignore
//! use vdoc_pipeline::{BuildTag, Pipeline};
//! use vdoc_storage::FsStorage;
//!
//! let storage = FsStorage::new("docs".into(), "_build".into());
//! let pipeline = Pipeline::new(&storage, BuildTag::new("freenas"));
//! pipeline.run(&["intro.rst".to_owned(), "storage.rst".to_owned()])?;
//! ```

mod conditional;
mod error;
mod include;
mod pipeline;
mod substitute;
mod tag;

pub use conditional::filter_conditionals;
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use substitute::{replacement_table, substitute};
pub use tag::{Brand, BuildTag};
