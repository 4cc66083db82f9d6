//! Cross-cutting error types for the composer crates.
//!
//! Domain-specific errors (e.g. `StorageError`, `ConfigError`) are defined in
//! their respective crates. Per-file failures during materialization are not
//! errors at all: they are reported as `FileOutcome::Error` values.

use thiserror::Error;

/// Errors that can be raised by any composer crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not name a variant of a closed enum.
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Content failed structural validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
