//! Outcome and report types handed to the presentation layer.
//!
//! The pipelines never fail as a whole because one file could not be written;
//! every order entry gets its own [`FileOutcome`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::ProcessingOrder;
use crate::paths;

/// What happened to one path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file did not exist before the write.
    Created,
    /// The file existed and was overwritten.
    Updated,
    /// Directory creation, write, or validation failed for this path only.
    Error(String),
    /// Nothing to write: no content and no placeholder template applies.
    Skipped(String),
}

impl FileOutcome {
    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Error(_) => "error",
            Self::Skipped(_) => "skipped",
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created | Self::Updated => f.write_str(self.label()),
            Self::Error(message) | Self::Skipped(message) => {
                write!(f, "{}: {message}", self.label())
            }
        }
    }
}

/// Status line for one path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    #[must_use]
    pub fn new(path: impl Into<String>, outcome: FileOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.outcome)
    }
}

/// Result of running one response through a pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplyReport {
    /// Final write order, including spliced placeholders.
    pub order: ProcessingOrder,
    /// One entry per processed path, in order.
    pub files: Vec<FileReport>,
    /// Non-fatal observations (e.g. scene reference cycles).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ApplyReport {
    /// File names (not full paths) of every created or updated file.
    #[must_use]
    pub fn modified_files(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|report| report.outcome.is_written())
            .map(|report| paths::file_name(&report.path))
            .collect()
    }

    /// Reports whose outcome is an error.
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|report| report.outcome.is_error())
    }

    /// True when at least one file was written and none failed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none() && !self.modified_files().is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn outcome_serializes_with_status_tag() {
        let report = FileReport::new("res://a.gd", FileOutcome::Error("disk full".into()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"path": "res://a.gd", "status": "error", "message": "disk full"})
        );

        let created = serde_json::to_value(FileReport::new("res://b.gd", FileOutcome::Created)).unwrap();
        assert_eq!(created, serde_json::json!({"path": "res://b.gd", "status": "created"}));
    }

    #[test]
    fn report_summaries() {
        let report = ApplyReport {
            order: ["res://a.gd", "res://b.tscn", "res://c.png"].into_iter().collect(),
            files: vec![
                FileReport::new("res://a.gd", FileOutcome::Created),
                FileReport::new("res://scenes/b.tscn", FileOutcome::Updated),
                FileReport::new("res://c.png", FileOutcome::Skipped("no template".into())),
            ],
            warnings: Vec::new(),
        };

        assert_eq!(report.modified_files(), vec!["a.gd", "b.tscn"]);
        assert!(report.all_succeeded());
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn any_failure_fails_the_report() {
        let report = ApplyReport {
            files: vec![
                FileReport::new("res://a.gd", FileOutcome::Created),
                FileReport::new("res://b.tscn", FileOutcome::Error("invalid scene".into())),
            ],
            ..ApplyReport::default()
        };
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn display_includes_message() {
        let line = FileReport::new("res://a.gd", FileOutcome::Error("denied".into())).to_string();
        assert_eq!(line, "res://a.gd error: denied");
    }
}
