use composer_core::{FileOutcome, paths};

use crate::error::StorageError;
use crate::storage::ProjectStorage;

/// What a successful write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Written {
    Created,
    Updated,
}

impl From<Written> for FileOutcome {
    fn from(written: Written) -> Self {
        match written {
            Written::Created => Self::Created,
            Written::Updated => Self::Updated,
        }
    }
}

/// Write `content` to `path`, creating the parent directory chain first.
///
/// No partial-write recovery: a failure at any step is returned as-is and
/// the caller decides how to report it.
///
/// # Errors
///
/// The first storage error from directory creation or the write itself.
pub fn write<S: ProjectStorage + ?Sized>(
    storage: &mut S,
    path: &str,
    content: &str,
) -> Result<Written, StorageError> {
    let existed = storage.exists(path);
    storage.make_dirs(&paths::parent(path))?;
    storage.write(path, content)?;

    tracing::info!(path, bytes = content.len(), existed, "wrote file");
    Ok(if existed {
        Written::Updated
    } else {
        Written::Created
    })
}

/// [`write`] folded into a per-file outcome.
pub fn materialize<S: ProjectStorage + ?Sized>(
    storage: &mut S,
    path: &str,
    content: &str,
) -> FileOutcome {
    match write(storage, path, content) {
        Ok(written) => written.into(),
        Err(error) => {
            tracing::warn!(path, %error, "write failed");
            FileOutcome::Error(error.to_string())
        }
    }
}
