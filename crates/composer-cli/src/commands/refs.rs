use std::path::Path;

use anyhow::bail;
use composer_apply::{FsStorage, ProjectStorage};
use composer_config::ComposerConfig;
use composer_core::FileKind;
use composer_scene::references_for;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RefsArgs;
use crate::commands::shared::read_file;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Reference {
    path: String,
    on_disk: bool,
}

/// Handle `composer refs`.
pub fn handle(args: &RefsArgs, config: &ComposerConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kind = analyzable_kind(&args.path)?;
    let content = read_file(&args.path)?;
    let storage = FsStorage::new(config.project.root_path());

    let references = references_for(kind, &content)
        .into_iter()
        .map(|path| Reference {
            on_disk: storage.exists(&path),
            path,
        })
        .collect::<Vec<_>>();
    output(&references, flags.format)
}

fn analyzable_kind(path: &Path) -> anyhow::Result<FileKind> {
    let kind = FileKind::from_path(&path.to_string_lossy());
    if kind == FileKind::Resource {
        bail!(
            "{} is neither a scene (.tscn) nor a script (.gd)",
            path.display()
        );
    }
    Ok(kind)
}
