//! End-to-end runs of both pipelines against real and in-memory storage.

use composer_apply::{
    Composer, FsStorage, MemoryStorage, OverlayStorage, ProjectStorage, Scheduler,
    has_all_dependencies,
};
use composer_config::PipelineConfig;
use composer_core::{DependencyEntry, FileKind, FileOutcome, FixedClock};
use composer_scene::placeholder::PLACEHOLDER_MARKER;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const CLOCK_SECONDS: i64 = 1_717_171_717;

fn composer_over<S: ProjectStorage>(storage: S) -> Composer<S, StdRng, FixedClock> {
    Composer::new(
        storage,
        StdRng::seed_from_u64(42),
        FixedClock::at_unix(CLOCK_SECONDS),
        PipelineConfig::default(),
    )
}

fn outcomes(report: &composer_core::ApplyReport) -> Vec<(&str, &FileOutcome)> {
    report
        .files
        .iter()
        .map(|file| (file.path.as_str(), &file.outcome))
        .collect()
}

#[test]
fn legacy_scene_is_upgraded_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut composer = composer_over(FsStorage::open(dir.path()).unwrap());

    let response = "File: res://Enemy.tscn\n```tscn\n[gd_scene format=2]\n\n[node name=\"Enemy\" type=\"KinematicBody2D\"]\n```";
    let report = composer.apply_response(response);

    assert_eq!(outcomes(&report), vec![("res://Enemy.tscn", &FileOutcome::Created)]);
    let written = std::fs::read_to_string(dir.path().join("Enemy.tscn")).unwrap();
    assert!(written.contains("format=3"));
    assert!(written.contains("uid=\"uid://"));
    assert!(written.contains("type=\"CharacterBody2D\""));
}

#[test]
fn missing_script_gets_a_placeholder_before_the_scene() {
    let mut composer = composer_over(MemoryStorage::new());
    let response = "Save this as res://Main.tscn:\n```tscn\n[gd_scene format=3]\n\n[node name=\"Main\" type=\"Node2D\"]\nscript = ExtResource(\"res://Player.gd\")\n```\n";
    let report = composer.apply_response(response);

    assert_eq!(
        report.order.as_slice(),
        ["res://Player.gd".to_string(), "res://Main.tscn".to_string()]
    );
    assert_eq!(
        outcomes(&report),
        vec![
            ("res://Player.gd", &FileOutcome::Created),
            ("res://Main.tscn", &FileOutcome::Created),
        ]
    );
    let script = composer.storage().read("res://Player.gd").unwrap();
    assert!(script.starts_with(PLACEHOLDER_MARKER));
    assert!(script.contains("extends CharacterBody2D"));
}

#[test]
fn placeholder_and_scene_are_marked_materialized_after_writing() {
    let composer = composer_over(MemoryStorage::new());
    let response = "Save this as res://Main.tscn:\n```tscn\n[gd_scene format=3]\n\n[node name=\"Main\" type=\"Node2D\"]\nscript = ExtResource(\"res://Player.gd\")\n```\n";
    let mut table = composer.build_table(response);
    let mut storage = composer.into_storage();
    let mut rng = StdRng::seed_from_u64(42);
    let options = PipelineConfig::default();

    let report = Scheduler::new(&mut storage, &mut rng, &options).process(&mut table);

    assert!(report.all_succeeded());
    assert!(table.get("res://Player.gd").is_some_and(DependencyEntry::is_materialized));
    assert!(table.get("res://Main.tscn").is_some_and(DependencyEntry::is_materialized));
    assert!(has_all_dependencies(&table, "res://Main.tscn", &storage));
}

#[test]
fn existing_files_are_updated_and_not_replaced_by_placeholders() {
    let storage = MemoryStorage::with_files([
        ("res://Player.gd", "extends CharacterBody2D\n# real code\n"),
        ("res://Main.tscn", "[gd_scene format=3]\n"),
    ]);
    let mut composer = composer_over(storage);
    let response = "File: res://Main.tscn\n```tscn\n[gd_scene format=3]\n\n[node name=\"Main\" type=\"Node2D\"]\nscript = ExtResource(\"res://Player.gd\")\n```\n";
    let report = composer.apply_response(response);

    assert_eq!(outcomes(&report), vec![("res://Main.tscn", &FileOutcome::Updated)]);
    assert_eq!(
        composer.storage().read("res://Player.gd").unwrap(),
        "extends CharacterBody2D\n# real code\n"
    );
}

#[test]
fn responses_do_not_share_state() {
    let mut composer = composer_over(MemoryStorage::new());
    let first = "File: res://hud.gd\n```gdscript\nextends Control\n```\n\nYou'll also need a menu scene called Pause.\n";
    let second = "File: res://coin.gd\n```gdscript\nextends Area2D\n```\n";

    let first_report = composer.apply_response(first);
    assert!(first_report.order.contains("res://Pause.tscn"));

    let second_report = composer.apply_response(second);
    assert_eq!(second_report.order.as_slice(), ["res://coin.gd".to_string()]);
}

#[test]
fn mixed_response_is_ordered_by_kind() {
    let mut composer = composer_over(MemoryStorage::new());
    let response = r#"Save this to `scenes/level.tscn`:

```tscn
[gd_scene load_steps=3 format=3]

[ext_resource type="PackedScene" path="res://scenes/coin.tscn" id="1_c"]
[ext_resource type="TileSet" path="res://tiles/ground_tileset.tres" id="2_t"]

[node name="Level" type="Node2D"]

[node name="Coin" parent="." instance=ExtResource("1_c")]
```

And the coin, file: scenes/coin.tscn

```tscn
[gd_scene format=3]

[node name="Coin" type="Area2D"]
script = ExtResource("res://scripts/coin.gd")
```
"#;
    let report = composer.apply_response(response);

    let kinds: Vec<FileKind> = report
        .order
        .iter()
        .map(FileKind::from_path)
        .collect();
    let mut sorted = kinds.clone();
    sorted.sort();
    assert_eq!(kinds, sorted);
    assert_eq!(
        report.order.as_slice(),
        [
            "res://tiles/ground_tileset.tres".to_string(),
            "res://scripts/coin.gd".to_string(),
            "res://scenes/level.tscn".to_string(),
            "res://scenes/coin.tscn".to_string(),
        ]
    );
    assert!(report.all_succeeded());
    let tileset = composer.storage().read("res://tiles/ground_tileset.tres").unwrap();
    assert!(tileset.contains("type=\"TileSet\""));
}

#[test]
fn one_failed_write_does_not_stop_the_others() {
    let storage = MemoryStorage::new().deny_writes_under("res://addons");
    let mut composer = composer_over(storage);
    let response = "File: res://addons/tool.gd\n```gdscript\nextends EditorPlugin\n```\n\nFile: res://main.gd\n```gdscript\nextends Node\n```\n";
    let report = composer.apply_response(response);

    assert_eq!(report.files.len(), 2);
    assert!(report.files[0].outcome.is_error());
    assert_eq!(report.files[1].outcome, FileOutcome::Created);
    assert!(!report.all_succeeded());
    assert_eq!(report.modified_files(), vec!["main.gd"]);
}

#[test]
fn scanned_scene_gets_companion_script() {
    let mut composer = composer_over(MemoryStorage::new());
    let response = "File: res://world.gd\n```gdscript\nextends Node2D\n```\n\nYou'll also need an enemy scene called Slime.\n";
    let report = composer.apply_response(response);

    assert!(report.all_succeeded());
    let scene = composer.storage().read("res://Slime.tscn").unwrap();
    assert!(scene.contains("[node name=\"Slime\" type=\"Node2D\"]"));
    assert!(scene.contains("path=\"res://Slime.gd\""));
    assert!(composer.storage().exists("res://Slime.gd"));
}

#[test]
fn dry_run_leaves_the_project_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let base = FsStorage::open(dir.path()).unwrap();
    let mut composer = composer_over(OverlayStorage::new(&base));

    let report = composer.apply_response("File: res://a/b.gd\n```gdscript\nextends Node\n```\n");
    assert_eq!(outcomes(&report), vec![("res://a/b.gd", &FileOutcome::Created)]);

    let overlay = composer.into_storage();
    assert_eq!(overlay.written().len(), 1);
    assert!(!dir.path().join("a").exists());
}

#[test]
fn fast_path_writes_labelled_blocks_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut composer = composer_over(FsStorage::open(dir.path()).unwrap());

    let response = "File: res://ui/hud.gd\n```gdscript\nextends CanvasLayer\n```\n\n```text\njust notes\n```\n";
    let report = composer.apply_fast(response);

    assert_eq!(outcomes(&report), vec![("res://ui/hud.gd", &FileOutcome::Created)]);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("ui/hud.gd")).unwrap(),
        "extends CanvasLayer\n"
    );
}
