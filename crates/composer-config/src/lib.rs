//! # composer-config
//!
//! Layered configuration loading for the response composer using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`COMPOSER_*` prefix, `__` as separator)
//! 2. Project-level `.composer/config.toml`
//! 3. User-level `~/.config/composer/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `COMPOSER_PIPELINE__FAST_PATH` -> `pipeline.fast_path`,
//! `COMPOSER_PROJECT__ROOT` -> `project.root`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use composer_config::ComposerConfig;
//!
//! let config = ComposerConfig::load_with_dotenv().expect("config");
//! if config.general.mode.can_write() {
//!     println!("writing into {}", config.project.root);
//! }
//! ```

mod error;
mod general;
mod pipeline;
mod project;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use pipeline::PipelineConfig;
pub use project::ProjectConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the project-local config file.
pub const LOCAL_CONFIG_DIR: &str = ".composer";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl ComposerConfig {
    /// Load configuration from all sources (TOML files + environment variables),
    /// looking for the project-local file under the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load configuration whose project-local layer comes from `project_dir`
    /// instead of the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_for_project(project_dir: &Path) -> Result<Self, ConfigError> {
        Self::figment_for(project_dir)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain rooted at the current directory.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain with the project-local layer read
    /// from `project_dir/.composer/config.toml`.
    #[must_use]
    pub fn figment_for(project_dir: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = Self::local_config_path(project_dir);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("COMPOSER_").split("__"))
    }

    /// Path of the project-local config file for `project_dir`.
    #[must_use]
    pub fn local_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(LOCAL_CONFIG_DIR).join("config.toml")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("composer").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace/)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
