use composer_apply::{FsStorage, ProjectStorage};
use composer_config::ComposerConfig;
use composer_core::{CodeBlock, DependencyEntry, DependencyTable, FileKind, SystemClock};
use composer_extract::{BlockExtractor, DependencyScanner};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ExtractArgs, ExtractVariant};
use crate::commands::shared::read_response;
use crate::output::output;

/// Where an extracted file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Source {
    Block,
    Prose,
}

#[derive(Debug, Serialize)]
struct ExtractedFile {
    path: String,
    kind: FileKind,
    source: Source,
    language: String,
    lines: usize,
}

impl ExtractedFile {
    fn from_block(block: &CodeBlock) -> Self {
        Self {
            path: block.inferred_path.clone(),
            kind: block.inferred_type,
            source: Source::Block,
            language: block.language_hint.clone(),
            lines: block.raw_content.lines().count(),
        }
    }

    fn from_scanned(entry: &DependencyEntry) -> Self {
        Self {
            path: entry.path.clone(),
            kind: entry.kind,
            source: Source::Prose,
            language: String::new(),
            lines: entry.content.lines().count(),
        }
    }
}

/// Handle `composer extract`.
pub fn handle(
    args: &ExtractArgs,
    config: &ComposerConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = read_response(args.input.as_deref())?;
    let storage = FsStorage::new(config.project.root_path());
    let files = extract(&response, args.variant, args.scan, |path| storage.exists(path));
    output(&files, flags.format)
}

fn extract(
    response: &str,
    variant: ExtractVariant,
    scan: bool,
    exists: impl Fn(&str) -> bool,
) -> Vec<ExtractedFile> {
    let extractor = BlockExtractor::new(SystemClock::new());
    let blocks = match variant {
        ExtractVariant::All => extractor.extract_all(response),
        ExtractVariant::First => extractor.extract_first(response).into_iter().collect(),
        ExtractVariant::Fast => extractor.extract_fast(response),
    };
    let mut files: Vec<ExtractedFile> = blocks.iter().map(ExtractedFile::from_block).collect();

    if scan {
        let mut table = DependencyTable::new();
        for block in &blocks {
            table.insert(DependencyEntry::with_content(
                block.inferred_path.as_str(),
                block.inferred_type,
                block.raw_content.as_str(),
            ));
        }
        DependencyScanner::new().scan(response, &mut table, exists);
        files.extend(
            table
                .iter()
                .filter(|entry| !blocks.iter().any(|b| b.inferred_path == entry.path))
                .map(ExtractedFile::from_scanned),
        );
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RESPONSE: &str = "File: res://player.gd\n```gdscript\nextends CharacterBody2D\n\nfunc _ready():\n\tpass\n```\n\nYou will also need an enemy scene called Bat.\n";

    #[test]
    fn lists_blocks() {
        let files = extract(RESPONSE, ExtractVariant::All, false, |_| false);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "res://player.gd");
        assert_eq!(files[0].kind, FileKind::Script);
        assert_eq!(files[0].source, Source::Block);
        assert_eq!(files[0].lines, 4);
    }

    #[test]
    fn scan_adds_files_implied_by_prose() {
        let files = extract(RESPONSE, ExtractVariant::All, true, |_| false);
        let paths: Vec<(&str, Source)> = files.iter().map(|f| (f.path.as_str(), f.source)).collect();
        assert_eq!(
            paths,
            vec![
                ("res://player.gd", Source::Block),
                ("res://Bat.tscn", Source::Prose),
                ("res://Bat.gd", Source::Prose),
            ]
        );
    }

    #[test]
    fn files_on_disk_are_not_implied() {
        let files = extract(RESPONSE, ExtractVariant::All, true, |path| path == "res://Bat.tscn");
        assert_eq!(files.len(), 1);
    }
}
