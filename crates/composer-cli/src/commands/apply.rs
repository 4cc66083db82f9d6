use anyhow::bail;
use composer_apply::{Composer, FsStorage, OverlayStorage};
use composer_config::ComposerConfig;
use composer_core::{ApplyReport, AssistantMode, SystemClock};
use composer_extract::{contains_code, fence_count};
use serde::Serialize;

use crate::cli::root_commands::ApplyArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::read_response;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ApplyResponse<'a> {
    pipeline: &'static str,
    dry_run: bool,
    #[serde(flatten)]
    report: &'a ApplyReport,
}

/// Handle `composer apply`.
pub fn handle(args: &ApplyArgs, config: &ComposerConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mode = args.mode.unwrap_or(config.general.mode);
    ensure_writable(mode, args.dry_run)?;

    let response = read_response(args.input.as_deref())?;
    tracing::debug!(
        fences = fence_count(&response),
        has_code = contains_code(&response),
        "read response"
    );

    let mut config = config.clone();
    config.pipeline.fast_path |= args.fast;

    let report = if args.dry_run {
        config.project.validate()?;
        let base = FsStorage::open(config.project.root_path())?;
        Composer::new(
            OverlayStorage::new(&base),
            rand::thread_rng(),
            SystemClock::new(),
            config.pipeline.clone(),
        )
        .apply(&response)
    } else {
        Composer::for_project(&config)?.apply(&response)
    };

    if flags.format == OutputFormat::Table {
        output(&report.files, flags.format)?;
    } else {
        output(
            &ApplyResponse {
                pipeline: if config.pipeline.fast_path { "fast" } else { "dependency" },
                dry_run: args.dry_run,
                report: &report,
            },
            flags.format,
        )?;
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{failed} of {} files failed", report.files.len());
    }
    Ok(())
}

/// Only composer mode writes; a dry run is allowed in any mode.
fn ensure_writable(mode: AssistantMode, dry_run: bool) -> anyhow::Result<()> {
    if mode.can_write() || dry_run {
        return Ok(());
    }
    bail!(
        "assistant mode is '{mode}', which never writes files; pass --mode composer, set general.mode = \"composer\", or use --dry-run"
    )
}
