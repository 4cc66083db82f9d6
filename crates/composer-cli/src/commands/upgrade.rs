use std::path::Path;

use anyhow::Context;
use composer_scene::upgrade::{header_format, needs_upgrade, upgrade};
use rand::Rng;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UpgradeArgs;
use crate::commands::shared::read_file;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct UpgradeResponse {
    path: String,
    format_before: Option<u32>,
    format_after: Option<u32>,
    changed: bool,
}

/// Handle `composer upgrade`.
pub fn handle(args: &UpgradeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let content = read_file(&args.path)?;
    let upgraded = upgrade_document(&content, &mut rand::thread_rng());

    if !args.in_place {
        print!("{upgraded}");
        return Ok(());
    }

    let response = write_back(&args.path, &content, &upgraded)?;
    output(&response, flags.format)
}

fn upgrade_document<R: Rng + ?Sized>(content: &str, rng: &mut R) -> String {
    if needs_upgrade(content) {
        upgrade(content, rng)
    } else {
        tracing::info!("document is already in the current format");
        content.to_string()
    }
}

fn write_back(path: &Path, before: &str, after: &str) -> anyhow::Result<UpgradeResponse> {
    let changed = before != after;
    if changed {
        std::fs::write(path, after)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(UpgradeResponse {
        path: path.display().to_string(),
        format_before: header_format(before),
        format_after: header_format(after),
        changed,
    })
}
