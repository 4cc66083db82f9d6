use serde::{Deserialize, Serialize};

use crate::enums::FileKind;

/// A fenced block pulled out of an assistant response, with its best-guess
/// target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag on the opening fence (may be empty).
    pub language_hint: String,
    /// Block body, exactly as it appeared between the fences.
    pub raw_content: String,
    /// Normalized `res://` target path.
    pub inferred_path: String,
    pub inferred_type: FileKind,
}

impl CodeBlock {
    #[must_use]
    pub fn new(
        language_hint: impl Into<String>,
        raw_content: impl Into<String>,
        inferred_path: impl Into<String>,
        inferred_type: FileKind,
    ) -> Self {
        Self {
            language_hint: language_hint.into(),
            raw_content: raw_content.into(),
            inferred_path: inferred_path.into(),
            inferred_type,
        }
    }
}
