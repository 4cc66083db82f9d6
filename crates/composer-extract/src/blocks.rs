use composer_core::{Clock, CodeBlock, FileKind, SystemClock};

use crate::fence::{Fence, fences};
use crate::hints;
use crate::naming::{self, NameStyle};

/// Extracts [`CodeBlock`]s from an assistant response.
///
/// The clock only feeds timestamped fallback names, so a fixed clock makes
/// extraction fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct BlockExtractor<C = SystemClock> {
    clock: C,
}

impl<C: Clock> BlockExtractor<C> {
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Every non-empty block, each paired with the closest path hint in the
    /// prose right before it. Blocks without a hint are named from their
    /// content; anything unrecognizable becomes a generic resource.
    #[must_use]
    pub fn extract_all(&self, response: &str) -> Vec<CodeBlock> {
        let blocks: Vec<CodeBlock> = fences(response)
            .into_iter()
            .map(|fence| {
                let hint = hints::last_path_hint(fence.preceding);
                self.resolve(&fence, hint, NameStyle::Lowercase)
            })
            .collect();
        tracing::debug!(count = blocks.len(), "extracted code blocks");
        blocks
    }

    /// The first non-empty block only. The path hint is the first one found
    /// anywhere in the response.
    #[must_use]
    pub fn extract_first(&self, response: &str) -> Option<CodeBlock> {
        let fence = fences(response).into_iter().next()?;
        let hint = hints::first_path_hint(response);
        Some(self.resolve(&fence, hint, NameStyle::Lowercase))
    }

    /// Blocks for the direct-write pipeline. Only an explicit `File:` label
    /// counts as a hint; without one, a block must be recognizable as a scene
    /// or a script by its language tag or content, otherwise it is skipped.
    #[must_use]
    pub fn extract_fast(&self, response: &str) -> Vec<CodeBlock> {
        let mut blocks = Vec::new();
        for fence in fences(response) {
            if let Some(path) = hints::file_label_hint(fence.preceding) {
                let kind = FileKind::from_path(&path);
                blocks.push(CodeBlock::new(fence.language, fence.content, path, kind));
                continue;
            }

            let language = fence.language.to_ascii_lowercase();
            let (path, kind) = if language == "tscn" || naming::looks_like_scene(fence.content) {
                (
                    naming::scene_path(fence.content, NameStyle::Verbatim, &self.clock),
                    FileKind::Scene,
                )
            } else if matches!(language.as_str(), "gdscript" | "gd")
                || fence.content.contains("extends ")
            {
                (
                    naming::script_path(fence.content, NameStyle::Verbatim, &self.clock),
                    FileKind::Script,
                )
            } else {
                tracing::debug!(language = fence.language, "unknown block type, skipping");
                continue;
            };
            blocks.push(CodeBlock::new(fence.language, fence.content, path, kind));
        }
        tracing::debug!(count = blocks.len(), "extracted code blocks (fast)");
        blocks
    }

    fn resolve(&self, fence: &Fence<'_>, hint: Option<String>, style: NameStyle) -> CodeBlock {
        let (path, kind) = match hint {
            Some(path) => {
                let kind = FileKind::from_path(&path);
                (path, kind)
            }
            None => naming::infer_target(fence.content, style, &self.clock),
        };
        tracing::debug!(path = %path, kind = %kind, "resolved block target");
        CodeBlock::new(fence.language, fence.content, path, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composer_core::FixedClock;
    use pretty_assertions::assert_eq;

    fn extractor() -> BlockExtractor<FixedClock> {
        BlockExtractor::new(FixedClock::at_unix(1_700_000_000))
    }

    #[test]
    fn script_without_hint_gets_generated_name() {
        let response = "Here is the file:\n```gdscript\nextends Node\nfunc _ready():\n\tpass\n```";
        let blocks = extractor().extract_all(response);
        assert_eq!(
            blocks,
            vec![CodeBlock::new(
                "gdscript",
                "extends Node\nfunc _ready():\n\tpass\n",
                "res://script_1700000000.gd",
                FileKind::Script,
            )]
        );
    }

    #[test]
    fn each_block_uses_its_own_hint() {
        let response = "Save to player.gd:\n```gdscript\nextends CharacterBody2D\n```\nAnd a config:\n```json\n{\"speed\": 4}\n```";
        let blocks = extractor().extract_all(response);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].inferred_path, "res://player.gd");
        assert_eq!(blocks[1].inferred_path, "res://resource_1700000000.json");
        assert_eq!(blocks[1].inferred_type, FileKind::Resource);
    }

    #[test]
    fn hinted_type_follows_extension() {
        let response = "File: res://ui/hud.tscn\n```\n[gd_scene format=3]\n[node name=\"Hud\" type=\"Control\"]\n```";
        let block = &extractor().extract_all(response)[0];
        assert_eq!(block.inferred_type, FileKind::Scene);
        assert_eq!(block.inferred_path, "res://ui/hud.tscn");
    }

    #[test]
    fn first_variant_returns_only_the_first_block() {
        let response = "```gd\nclass_name A\nextends Node\n```\n```gd\nclass_name B\nextends Node\n```";
        let block = extractor().extract_first(response);
        assert_eq!(block.map(|b| b.inferred_path), Some("res://A.gd".to_string()));
        assert_eq!(extractor().extract_first("no code"), None);
    }

    #[test]
    fn fast_variant_skips_unknown_blocks() {
        let response = "```bash\necho hi\n```\n```gd\nvar x = 1\n```";
        let blocks = extractor().extract_fast(response);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].inferred_path, "res://Script_1700000000.gd");

        let legacy = extractor().extract_all(response);
        assert_eq!(legacy.len(), 2);
        assert_eq!(legacy[0].inferred_path, "res://resource_1700000000.txt");
    }

    #[test]
    fn fast_variant_uses_file_label_and_verbatim_node_names() {
        let response = "File: res://Enemy.tscn\n```tscn\n[gd_scene format=2]\n\n[node name=\"Enemy\" type=\"KinematicBody2D\"]\n```\n```tscn\n[gd_scene format=3]\n[node name=\"Main Level\" type=\"Node2D\"]\n```";
        let blocks = extractor().extract_fast(response);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].inferred_path, "res://Enemy.tscn");
        assert_eq!(blocks[0].inferred_type, FileKind::Scene);
        assert_eq!(blocks[1].inferred_path, "res://Main Level.tscn");
    }

    #[test]
    fn no_fences_no_blocks() {
        assert!(extractor().extract_all("Use a Timer node.").is_empty());
        assert!(extractor().extract_fast("Use a Timer node.").is_empty());
    }
}
