use composer_config::ConfigError;
use thiserror::Error;

/// Failures of the storage abstraction. During materialization these become
/// per-file `FileOutcome::Error` values rather than propagated errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("path escapes the project root: {0}")]
    OutsideRoot(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that stop a pipeline before any file is touched.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
