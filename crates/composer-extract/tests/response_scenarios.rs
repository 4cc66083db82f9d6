//! Whole-response extraction and scanning behavior.

use composer_core::{DependencyTable, FileKind, FixedClock, paths};
use composer_extract::{BlockExtractor, DependencyScanner, contains_code, fence_count};
use pretty_assertions::assert_eq;

fn extractor() -> BlockExtractor<FixedClock> {
    BlockExtractor::new(FixedClock::at_unix(1_717_171_717))
}

#[test]
fn unhinted_script_block_is_extracted_verbatim() {
    let response = "Here is the file:\n```gdscript\nextends Node\nfunc _ready():\n\tpass\n```";
    let blocks = extractor().extract_all(response);

    assert_eq!(blocks.len(), 1);
    let block = &blocks[0];
    assert_eq!(block.inferred_type, FileKind::Script);
    assert!(block.inferred_path.ends_with(".gd"));
    assert!(paths::is_project_path(&block.inferred_path));
    assert_eq!(block.raw_content, "extends Node\nfunc _ready():\n\tpass\n");
}

#[test]
fn prose_only_response_yields_nothing() {
    let response = "To make the character jump, check `is_on_floor()` before applying velocity.";
    assert!(!contains_code(response));
    assert_eq!(fence_count(response), 0);
    assert!(extractor().extract_all(response).is_empty());
    assert!(extractor().extract_first(response).is_none());

    let mut table = DependencyTable::new();
    assert_eq!(DependencyScanner::new().scan(response, &mut table, |_| false), 0);
    assert!(table.is_empty());
}

#[test]
fn multi_file_response() {
    let response = r#"I'll set up the player. Save this to `scenes/player.tscn`:

```tscn
[gd_scene load_steps=2 format=3]

[ext_resource type="Script" path="res://scripts/player.gd" id="1_a"]

[node name="Player" type="CharacterBody2D"]
script = ExtResource("1_a")
```

And the script, file: scripts/player.gd

```gdscript
extends CharacterBody2D

const Bullet = preload("res://scenes/bullet.tscn")
```

You'll also need an enemy scene called Slime.
"#;

    let blocks = extractor().extract_all(response);
    let targets: Vec<_> = blocks
        .iter()
        .map(|b| (b.inferred_path.as_str(), b.inferred_type))
        .collect();
    assert_eq!(
        targets,
        vec![
            ("res://scenes/player.tscn", FileKind::Scene),
            ("res://scripts/player.gd", FileKind::Script),
        ]
    );

    let mut table = DependencyTable::new();
    DependencyScanner::new().scan(response, &mut table, |_| false);
    assert_eq!(
        table.paths().collect::<Vec<_>>(),
        vec!["res://Slime.tscn", "res://Slime.gd"]
    );
}

#[test]
fn fast_and_legacy_variants_disagree_on_unknown_blocks() {
    let response = "```text\nremember to enable the autoload\n```";
    assert!(extractor().extract_fast(response).is_empty());

    let legacy = extractor().extract_all(response);
    assert_eq!(legacy.len(), 1);
    assert_eq!(legacy[0].inferred_type, FileKind::Resource);
    assert_eq!(legacy[0].inferred_path, "res://resource_1717171717.txt");
}
