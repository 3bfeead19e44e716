//! CLI error types.

use vdoc_config::ConfigError;
use vdoc_pipeline::PipelineError;
use vdoc_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(String),
}
