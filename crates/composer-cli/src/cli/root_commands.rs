use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use composer_core::AssistantMode;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Write the files in an assistant response into the project.
    Apply(ApplyArgs),
    /// List the code blocks a response contains and where they would land.
    Extract(ExtractArgs),
    /// Rewrite a legacy scene to the current format.
    Upgrade(UpgradeArgs),
    /// List the project paths a scene or script references.
    Refs(RefsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ApplyArgs {
    /// Response file to read (`-` or omitted for stdin).
    pub input: Option<PathBuf>,

    /// Use the direct-write pipeline: `File:` labelled blocks only, no
    /// dependency handling.
    #[arg(long)]
    pub fast: bool,

    /// Run the pipeline against an in-memory overlay; nothing is written.
    #[arg(long)]
    pub dry_run: bool,

    /// Assistant mode for this run (overrides `general.mode`).
    #[arg(long)]
    pub mode: Option<AssistantMode>,
}

/// Which extraction entry point to run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ExtractVariant {
    /// Every block, with generic names for unrecognized ones.
    #[default]
    All,
    /// The first block only.
    First,
    /// `File:` labelled or recognizable blocks; the rest are skipped.
    Fast,
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// Response file to read (`-` or omitted for stdin).
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ExtractVariant::All)]
    pub variant: ExtractVariant,

    /// Also list the files the prose implies.
    #[arg(long)]
    pub scan: bool,
}

#[derive(Clone, Debug, Args)]
pub struct UpgradeArgs {
    /// Scene file to upgrade.
    pub path: PathBuf,

    /// Overwrite the file instead of printing the result.
    #[arg(long)]
    pub in_place: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RefsArgs {
    /// Scene (`.tscn`) or script (`.gd`) file to analyze.
    pub path: PathBuf,
}
