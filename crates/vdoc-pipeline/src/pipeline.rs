//! Per-file transformation pipeline.
//!
//! For each top-level document the stages run strictly in sequence:
//! include expansion, conditional filtering, placeholder substitution.
//! Includes are resolved first because included content needs conditional
//! and substitution processing itself, applied recursively at the moment
//! it is pulled in; conditionals then run over the fully expanded buffer;
//! substitutions run last so that placeholders inside freshly included
//! text are still caught.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vdoc_storage::DocStorage;

use crate::conditional::filter_conditionals;
use crate::error::PipelineError;
use crate::include::resolve_includes;
use crate::substitute::substitute;
use crate::tag::BuildTag;

/// Transformation pipeline for one build variant.
///
/// Holds the immutable build tag and the storage backend; the chapter
/// counter is owned by [`run`](Self::run) and passed down by value.
///
/// # Example
///
/// ```ignore
/// use vdoc_pipeline::{BuildTag, Pipeline};
/// use vdoc_storage::FsStorage;
///
/// let storage = FsStorage::new("docs".into(), "_build".into());
/// let pipeline = Pipeline::new(&storage, BuildTag::new("freenas"));
/// pipeline.run(&["intro.rst".to_owned()])?;
/// ```
pub struct Pipeline<'a> {
    storage: &'a dyn DocStorage,
    tag: BuildTag,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline for the given storage backend and build tag.
    #[must_use]
    pub fn new(storage: &'a dyn DocStorage, tag: BuildTag) -> Self {
        Self { storage, tag }
    }

    /// Transform one top-level document and return the finished text.
    ///
    /// # Errors
    ///
    /// Returns the first [`PipelineError`] encountered; all are fatal.
    pub fn process_document(&self, path: &Path, chapter: usize) -> Result<String, PipelineError> {
        let mut chain = Vec::new();
        self.process_file(path, chapter, &mut chain)
    }

    /// Process every document in the build manifest in order, writing the
    /// transformed text under the mirrored output path.
    ///
    /// The chapter index counts top-level documents from zero in manifest
    /// order; includes do not advance it.
    ///
    /// # Errors
    ///
    /// Returns the first [`PipelineError`] encountered; the run stops and
    /// no further documents are written.
    pub fn run(&self, documents: &[String]) -> Result<(), PipelineError> {
        for (chapter, doc) in documents.iter().enumerate() {
            let path = Path::new(doc);
            let finished = self.process_document(path, chapter)?;
            self.storage.write(path, &finished)?;
            info!(file = doc.as_str(), chapter, "transformed document");
        }
        Ok(())
    }

    /// Run the full per-file pipeline on one file.
    ///
    /// `chain` holds the files currently open in the include chain, so a
    /// cycle surfaces as [`PipelineError::IncludeCycle`] instead of
    /// unbounded recursion.
    fn process_file(
        &self,
        path: &Path,
        chapter: usize,
        chain: &mut Vec<PathBuf>,
    ) -> Result<String, PipelineError> {
        if chain.iter().any(|open| open == path) {
            return Err(PipelineError::IncludeCycle(path.to_path_buf()));
        }
        chain.push(path.to_path_buf());
        debug!(file = %path.display(), chapter, depth = chain.len(), "processing file");

        let source = self.storage.read(path)?;
        let expanded = resolve_includes(&source, path, |included| {
            self.process_file(included, chapter, chain)
        })?;
        let filtered = filter_conditionals(&expanded, &self.tag, path)?;
        let finished = substitute(&filtered, &self.tag, chapter, path)?;

        chain.pop();
        Ok(finished)
    }
}
