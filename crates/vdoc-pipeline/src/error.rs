//! Pipeline error types.

use std::path::PathBuf;

use vdoc_storage::StorageError;

/// Error raised while transforming a document.
///
/// Every variant is fatal: the first failure aborts the whole run and no
/// partial output is considered valid.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A referenced master, included, or list file is absent.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A directive line carries unexpected trailing content.
    #[error("Malformed directive in {}: `{line}`", .file.display())]
    MalformedDirective {
        /// File containing the directive.
        file: PathBuf,
        /// The offending line, trimmed.
        line: String,
    },

    /// A conditional open has no reachable matching close with the same
    /// label, or a marker survives filtering unresolved.
    #[error("Unmatched conditional `{label}` in {}", .file.display())]
    UnmatchedDirective {
        /// File containing the directive.
        file: PathBuf,
        /// The block label.
        label: String,
    },

    /// A table cell lacks enough trailing space to absorb a longer
    /// replacement while preserving column width.
    #[error(
        "Insufficient padding in {}: cell `{cell}` cannot absorb replacement for `{placeholder}`",
        .file.display()
    )]
    InsufficientPadding {
        /// File containing the table row.
        file: PathBuf,
        /// The placeholder being replaced.
        placeholder: String,
        /// The offending cell, trimmed.
        cell: String,
    },

    /// Recursive inclusion revisited a file already open in the current
    /// include chain.
    #[error("Include cycle: {} is already being included", .0.display())]
    IncludeCycle(PathBuf),

    /// Underlying storage failure other than a missing file.
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for PipelineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => Self::FileNotFound(path),
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_from_storage() {
        let err = PipelineError::from(StorageError::NotFound(PathBuf::from("sub.rst")));
        assert!(matches!(err, PipelineError::FileNotFound(_)));
        assert_eq!(err.to_string(), "File not found: sub.rst");
    }

    #[test]
    fn test_unmatched_display_names_label_and_file() {
        let err = PipelineError::UnmatchedDirective {
            file: PathBuf::from("intro.rst"),
            label: "foo".to_owned(),
        };
        assert_eq!(err.to_string(), "Unmatched conditional `foo` in intro.rst");
    }

    #[test]
    fn test_malformed_display_quotes_line() {
        let err = PipelineError::MalformedDirective {
            file: PathBuf::from("intro.rst"),
            line: "#include sub.rst extra".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed directive in intro.rst: `#include sub.rst extra`"
        );
    }
}
