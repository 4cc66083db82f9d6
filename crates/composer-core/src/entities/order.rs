use serde::{Deserialize, Serialize};

/// Index-addressable sequence of table paths in write order.
///
/// The scheduler splices placeholders in front of the entry that needs them
/// while walking the order by index, so this is a plain vector rather than a
/// view over the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProcessingOrder(Vec<String>);

impl ProcessingOrder {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.0.push(path.into());
    }

    /// Insert `path` at `index`, shifting later entries right.
    pub fn insert(&mut self, index: usize, path: impl Into<String>) {
        self.0.insert(index, path.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn position(&self, path: &str) -> Option<usize> {
        self.0.iter().position(|p| p == path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ProcessingOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
