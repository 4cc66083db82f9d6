use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::enums::FileKind;

/// One file the pipeline intends to write.
///
/// `content` may be empty, meaning "synthesize a placeholder when this entry
/// is reached". `materialized` moves from `false` to `true` at most once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyEntry {
    pub path: String,
    pub content: String,
    pub kind: FileKind,
    pub references: BTreeSet<String>,
    materialized: bool,
}

impl DependencyEntry {
    /// Entry sourced from a code block.
    #[must_use]
    pub fn with_content(path: impl Into<String>, kind: FileKind, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
            references: BTreeSet::new(),
            materialized: false,
        }
    }

    /// Entry with no content yet; a placeholder is synthesized when written.
    #[must_use]
    pub fn pending(path: impl Into<String>, kind: FileKind) -> Self {
        Self::with_content(path, kind, String::new())
    }

    #[must_use]
    pub fn with_references(mut self, references: BTreeSet<String>) -> Self {
        self.references = references;
        self
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Flag the entry as written. Returns `false` if it already was.
    pub fn mark_materialized(&mut self) -> bool {
        let transitioned = !self.materialized;
        self.materialized = true;
        transitioned
    }
}

/// Per-response dependency table keyed by normalized path.
///
/// Iteration follows insertion order; re-inserting a path overwrites the entry
/// in place without moving it. A table is built fresh for every response and
/// dropped afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyTable {
    entries: IndexMap<String, DependencyEntry>,
}

impl DependencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous entry for the path, if any.
    pub fn insert(&mut self, entry: DependencyEntry) -> Option<DependencyEntry> {
        self.entries.insert(entry.path.clone(), entry)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&DependencyEntry> {
        self.entries.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut DependencyEntry> {
        self.entries.get_mut(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyEntry> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DependencyEntry> {
        self.entries.values_mut()
    }

    /// Paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries of one kind, in insertion order.
    pub fn of_kind(&self, kind: FileKind) -> impl Iterator<Item = &DependencyEntry> {
        self.entries.values().filter(move |entry| entry.kind == kind)
    }
}
