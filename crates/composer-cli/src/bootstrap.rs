use std::path::{Path, PathBuf};

use anyhow::Context;
use composer_config::ComposerConfig;

use crate::cli::GlobalFlags;

/// Project directory the command works against: `--project`, else the
/// working directory.
pub fn project_dir(flags: &GlobalFlags) -> anyhow::Result<PathBuf> {
    match &flags.project {
        Some(project) => Ok(PathBuf::from(project)),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Load `.env` and the layered config for the project. `--project` wins over
/// `project.root`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ComposerConfig> {
    let dir = project_dir(flags)?;
    load_project_dotenv(&dir)?;

    let mut config = ComposerConfig::load_for_project(&dir)
        .with_context(|| format!("failed to load configuration for {}", dir.display()))?;
    if let Some(project) = &flags.project {
        config.project.root.clone_from(project);
    }
    tracing::debug!(root = %config.project.root, mode = %config.general.mode, "loaded configuration");
    Ok(config)
}

fn load_project_dotenv(dir: &Path) -> anyhow::Result<()> {
    let env_path = dir.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
