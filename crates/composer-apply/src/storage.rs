//! Project storage abstraction.
//!
//! All paths handed to storage are normalized `res://` paths. Three
//! implementations ship with the crate:
//! - [`FsStorage`]: maps `res://` onto a directory on disk
//! - [`MemoryStorage`]: a map of paths to contents, with optional
//!   write-denied prefixes for exercising failure handling
//! - [`OverlayStorage`]: reads fall through to a base storage, writes stay in
//!   memory (dry runs)

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use composer_core::paths;

use crate::error::StorageError;

pub trait ProjectStorage {
    fn exists(&self, path: &str) -> bool;

    /// # Errors
    ///
    /// [`StorageError::NotFound`] when nothing is stored at `path`.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Truncating write of the full content.
    ///
    /// # Errors
    ///
    /// Any storage-layer failure for this path.
    fn write(&mut self, path: &str, content: &str) -> Result<(), StorageError>;

    /// Recursive directory creation; already-existing directories are fine.
    ///
    /// # Errors
    ///
    /// Any storage-layer failure for this path.
    fn make_dirs(&mut self, path: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Storage rooted at a project directory on disk.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Storage rooted at `root`. The directory is not checked; see
    /// [`Self::open`].
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] when `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StorageError::NotFound(root.display().to_string()));
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a project path.
    ///
    /// # Errors
    ///
    /// [`StorageError::OutsideRoot`] when the path climbs out of the project
    /// with `..` components.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(paths::relative(path));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::OutsideRoot(path.to_string()));
                }
            }
        }
        Ok(resolved)
    }

    fn io_error(path: &str, source: io::Error) -> StorageError {
        match source.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(path.to_string()),
            _ => StorageError::Io {
                path: path.to_string(),
                source,
            },
        }
    }
}

impl ProjectStorage for FsStorage {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|resolved| resolved.exists())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let resolved = self.resolve(path)?;
        fs::read_to_string(resolved).map_err(|e| Self::io_error(path, e))
    }

    fn write(&mut self, path: &str, content: &str) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;
        fs::write(resolved, content).map_err(|e| Self::io_error(path, e))
    }

    fn make_dirs(&mut self, path: &str) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;
        fs::create_dir_all(resolved).map_err(|e| Self::io_error(path, e))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
    denied: Vec<String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `files`.
    #[must_use]
    pub fn with_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut storage = Self::new();
        for (path, content) in files {
            storage
                .files
                .insert(paths::normalize(path.as_ref()), content.into());
        }
        storage
    }

    /// Refuse every write and directory creation under `prefix`.
    #[must_use]
    pub fn deny_writes_under(mut self, prefix: impl AsRef<str>) -> Self {
        self.denied.push(paths::normalize(prefix.as_ref()));
        self
    }

    #[must_use]
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn check_allowed(&self, path: &str) -> Result<(), StorageError> {
        let denied = self.denied.iter().any(|prefix| {
            path.strip_prefix(prefix.trim_end_matches('/'))
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        });
        if denied {
            return Err(StorageError::PermissionDenied(path.to_string()));
        }
        Ok(())
    }
}

impl ProjectStorage for MemoryStorage {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn write(&mut self, path: &str, content: &str) -> Result<(), StorageError> {
        self.check_allowed(path)?;
        self.files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn make_dirs(&mut self, path: &str) -> Result<(), StorageError> {
        self.check_allowed(path)?;
        self.dirs.insert(path.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Read-through overlay: existence checks and reads see the base storage,
/// writes only ever land in memory.
#[derive(Debug)]
pub struct OverlayStorage<'a, S: ?Sized> {
    base: &'a S,
    overlay: MemoryStorage,
}

impl<'a, S: ProjectStorage + ?Sized> OverlayStorage<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            overlay: MemoryStorage::new(),
        }
    }

    /// Files written so far.
    #[must_use]
    pub const fn written(&self) -> &MemoryStorage {
        &self.overlay
    }
}

impl<S: ProjectStorage + ?Sized> ProjectStorage for OverlayStorage<'_, S> {
    fn exists(&self, path: &str) -> bool {
        self.overlay.exists(path) || self.base.exists(path)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.overlay.read(path).or_else(|_| self.base.read(path))
    }

    fn write(&mut self, path: &str, content: &str) -> Result<(), StorageError> {
        self.overlay.write(path, content)
    }

    fn make_dirs(&mut self, path: &str) -> Result<(), StorageError> {
        self.overlay.make_dirs(path)
    }
}
