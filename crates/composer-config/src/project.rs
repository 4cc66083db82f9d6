//! Project location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default project root: the working directory.
fn default_root() -> String {
    String::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Filesystem directory that `res://` resolves to.
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl ProjectConfig {
    /// Whether a root has been set at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.root.trim().is_empty()
    }

    #[must_use]
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(self.root.trim())
    }

    /// Check that the root names an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for an empty root and
    /// [`ConfigError::InvalidValue`] when the path is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "project".to_string(),
            });
        }
        let root = self.root_path();
        if !root.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "project.root".to_string(),
                reason: format!("'{}' is not a directory", root.display()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_working_directory() {
        let config = ProjectConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.root_path(), PathBuf::from("."));
    }

    #[test]
    fn empty_root_is_not_configured() {
        let config = ProjectConfig {
            root: "  ".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn missing_directory_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        let config = ProjectConfig {
            root: missing.display().to_string(),
        };
        let err = config.validate().expect_err("missing dir");
        assert!(err.to_string().contains("project.root"));
    }

    #[test]
    fn existing_directory_validates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ProjectConfig {
            root: dir.path().display().to_string(),
        };
        assert!(config.validate().is_ok());
    }
}
