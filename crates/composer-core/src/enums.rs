//! Closed enums shared across the composer crates.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and round-trip through `as_str()` / `FromStr`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::paths;

// ---------------------------------------------------------------------------
// FileKind
// ---------------------------------------------------------------------------

/// What a project file is, as far as dependency ordering is concerned.
///
/// Resources are written first, then scripts, then scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Resource,
    Script,
    Scene,
}

impl FileKind {
    /// Classify a path by its extension: `.gd` is a script, `.tscn` a scene,
    /// anything else a resource.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self::from_extension(paths::extension(path))
    }

    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case(paths::SCRIPT_EXTENSION) {
            Self::Script
        } else if extension.eq_ignore_ascii_case(paths::SCENE_EXTENSION) {
            Self::Scene
        } else {
            Self::Resource
        }
    }

    /// Default extension used when a name is promoted to a path of this kind.
    #[must_use]
    pub const fn default_extension(self) -> &'static str {
        match self {
            Self::Script => paths::SCRIPT_EXTENSION,
            Self::Scene => paths::SCENE_EXTENSION,
            Self::Resource => paths::RESOURCE_EXTENSION,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Script => "script",
            Self::Scene => "scene",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "resource" => Ok(Self::Resource),
            "script" => Ok(Self::Script),
            "scene" => Ok(Self::Scene),
            _ => Err(CoreError::UnknownVariant {
                kind: "file kind",
                value: value.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// AssistantMode
// ---------------------------------------------------------------------------

/// Whether the caller may write to the project.
///
/// `Ask` is read-only: responses are shown, never materialized. `Composer`
/// enables the write pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantMode {
    #[default]
    Ask,
    Composer,
}

impl AssistantMode {
    #[must_use]
    pub const fn can_write(self) -> bool {
        matches!(self, Self::Composer)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Composer => "composer",
        }
    }
}

impl fmt::Display for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantMode {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "composer" => Ok(Self::Composer),
            _ => Err(CoreError::UnknownVariant {
                kind: "assistant mode",
                value: value.to_string(),
            }),
        }
    }
}
