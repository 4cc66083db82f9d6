//! Reference analysis for scene and script documents.
//!
//! Both analyzers return the normalized set of project paths a document points
//! at. Duplicates collapse; the caller decides what to do with paths that are
//! neither tracked nor present on disk.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use composer_core::FileKind;
use composer_core::paths;
use regex::Regex;

// ---------------------------------------------------------------------------
// Scene patterns
// ---------------------------------------------------------------------------

/// `[ext_resource ...]` / `[sub_resource ...]` section headers.
static RESOURCE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[(ext_resource|sub_resource)\b([^\]\n]*)\]").expect("valid regex")
});

/// `key="value"` or `key=value` inside a section header.
static HEADER_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(\w+)\s*=\s*(?:"([^"]*)"|([^\s"\]]+))"#).expect("valid regex")
});

/// `script = ExtResource("...")`
static SCRIPT_ATTACH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bscript\s*=\s*(?:Ext)?Resource\(\s*["']([^"']+)["']\s*\)"#)
        .expect("valid regex")
});

/// Any `ExtResource("...")`, `SubResource("...")` or `Resource("...")` argument.
static RESOURCE_ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(Ext|Sub)?Resource\(\s*["']([^"']+)["']\s*\)"#).expect("valid regex")
});

/// Legacy unquoted numeric ids: `ExtResource( 1 )`.
static NUMERIC_EXT_ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bExtResource\(\s*(\d+)\s*\)").expect("valid regex"));

/// `instance = ExtResource("...")` / `packed_scene = ExtResource("...")`
static INSTANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:instance|packed_scene)\s*=\s*(?:Ext)?Resource\(\s*["']([^"']+)["']\s*\)"#)
        .expect("valid regex")
});

/// `[node name="..." instance="..."]` / `[node name="..." parent="..."]`
static CHILD_NODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[node\s+name\s*=\s*["'][^"']*["']\s+(?:instance|parent)\s*=\s*["']([^"']+)["']"#)
        .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Script patterns
// ---------------------------------------------------------------------------

static LOAD_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:preload|load)\(\s*["']([^"']+)["']\s*\)"#).expect("valid regex")
});

static BARE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"res://[\w.\-/]+\.(?:tres|tscn|gd|res|import|shader|gdshader)\b")
        .expect("valid regex")
});

/// Declared `[ext_resource]` and `[sub_resource]` ids of a scene document.
#[derive(Debug, Default)]
struct DeclaredResources {
    /// External id -> declared path.
    external: HashMap<String, String>,
    /// Local sub-resource ids; references to these stay inside the document.
    local: HashSet<String>,
}

impl DeclaredResources {
    fn parse(content: &str) -> Self {
        let mut declared = Self::default();
        for header in RESOURCE_HEADER_RE.captures_iter(content) {
            let mut id = None;
            let mut path = None;
            for attr in HEADER_ATTR_RE.captures_iter(&header[2]) {
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .map(|m| m.as_str().to_string());
                match &attr[1] {
                    "id" => id = value,
                    "path" => path = value,
                    _ => {}
                }
            }
            match (&header[1], id) {
                ("ext_resource", Some(id)) => {
                    declared.external.insert(id, path.unwrap_or_default());
                }
                ("sub_resource", Some(id)) => {
                    declared.local.insert(id);
                }
                _ => {}
            }
        }
        declared
    }

    /// Resolve a reference argument to a project path, or `None` when it is a
    /// local id or an undeclared token that does not name a file.
    fn resolve(&self, argument: &str) -> Option<String> {
        if let Some(path) = self.external.get(argument) {
            return (!path.is_empty()).then(|| paths::normalize(path));
        }
        if self.local.contains(argument) {
            return None;
        }
        paths::looks_like_file(argument).then(|| paths::normalize(argument))
    }
}

/// Paths a scene document references: attached scripts, external resources,
/// instanced scenes, and file-like child node attributes.
#[must_use]
pub fn scene_references(content: &str) -> BTreeSet<String> {
    let declared = DeclaredResources::parse(content);
    let mut references: BTreeSet<String> = declared
        .external
        .values()
        .filter(|path| !path.is_empty())
        .map(|path| paths::normalize(path))
        .collect();

    for caps in SCRIPT_ATTACH_RE.captures_iter(content) {
        references.extend(declared.resolve(&caps[1]));
    }
    for caps in RESOURCE_ARG_RE.captures_iter(content) {
        if caps.get(1).is_some_and(|m| m.as_str() == "Sub") {
            continue;
        }
        references.extend(declared.resolve(&caps[2]));
    }
    for caps in NUMERIC_EXT_ARG_RE.captures_iter(content) {
        references.extend(declared.resolve(&caps[1]));
    }
    for caps in INSTANCE_RE.captures_iter(content) {
        references.extend(declared.resolve(&caps[1]));
    }
    for caps in CHILD_NODE_RE.captures_iter(content) {
        let target = &caps[1];
        if paths::looks_like_file(target) {
            references.insert(paths::normalize(target));
        }
    }

    references
}

/// Paths a script document references: `preload`/`load` arguments and bare
/// `res://` paths with a known extension.
#[must_use]
pub fn script_references(content: &str) -> BTreeSet<String> {
    let mut references = BTreeSet::new();

    for caps in LOAD_CALL_RE.captures_iter(content) {
        let argument = &caps[1];
        // user:// and other non-project schemes are runtime data, not files we write.
        if argument.contains("://") && !paths::is_project_path(argument) {
            continue;
        }
        references.insert(paths::normalize(argument));
    }
    for m in BARE_PATH_RE.find_iter(content) {
        references.insert(paths::normalize(m.as_str()));
    }

    references
}

/// Dispatch to the analyzer for `kind`. Resources reference nothing.
#[must_use]
pub fn references_for(kind: FileKind, content: &str) -> BTreeSet<String> {
    match kind {
        FileKind::Scene => scene_references(content),
        FileKind::Script => script_references(content),
        FileKind::Resource => BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn scene_script_attachment() {
        let scene = "[gd_scene format=3]\n\n[node name=\"Player\" type=\"CharacterBody2D\"]\nscript = ExtResource(\"res://Player.gd\")\n";
        assert_eq!(scene_references(scene), set(&["res://Player.gd"]));
    }

    #[test]
    fn scene_ext_resource_ids_resolve_to_declared_paths() {
        let scene = r#"[gd_scene load_steps=3 format=3 uid="uid://abc"]

[ext_resource type="Script" path="res://player.gd" id="1_kq2p"]
[ext_resource type="PackedScene" path="res://hud.tscn" id="2_x"]

[sub_resource type="RectangleShape2D" id="RectangleShape2D_1"]
size = Vector2(10, 10)

[node name="Main" type="Node2D"]
script = ExtResource("1_kq2p")

[node name="Hud" parent="." instance=ExtResource("2_x")]

[node name="Shape" type="CollisionShape2D" parent="."]
shape = SubResource("RectangleShape2D_1")
"#;
        assert_eq!(
            scene_references(scene),
            set(&["res://hud.tscn", "res://player.gd"])
        );
    }

    #[test]
    fn scene_legacy_numeric_ids() {
        let scene = "[gd_scene load_steps=2 format=2]\n\n[ext_resource path=\"res://enemy.gd\" type=\"Script\" id=1]\n\n[node name=\"Enemy\" type=\"KinematicBody2D\"]\nscript = ExtResource( 1 )\n";
        assert_eq!(scene_references(scene), set(&["res://enemy.gd"]));
    }

    #[test]
    fn scene_instance_and_child_nodes() {
        let scene = concat!(
            "[node name=\"Level\" type=\"Node2D\"]\n",
            "[node name=\"Coin\" instance=\"res://coin.tscn\"]\n",
            "[node name=\"Sprite\" parent=\".\"]\n",
            "packed_scene = ExtResource(\"bullet.tscn\")\n",
        );
        assert_eq!(
            scene_references(scene),
            set(&["res://bullet.tscn", "res://coin.tscn"])
        );
    }

    #[test]
    fn scene_references_deduplicate() {
        let scene = "script = ExtResource(\"a.gd\")\nscript = ExtResource(\"res://a.gd\")\n";
        assert_eq!(scene_references(scene), set(&["res://a.gd"]));
    }

    #[test]
    fn script_load_calls_and_bare_paths() {
        let script = r#"extends Node

const Bullet = preload("res://bullet.tscn")
var save_path = "user://save.dat"

func _ready():
	var hud = load("ui/hud.tscn")
	var cfg = load("user://settings.cfg")
	print("res://data/items.tres")
"#;
        assert_eq!(
            script_references(script),
            set(&["res://bullet.tscn", "res://data/items.tres", "res://ui/hud.tscn"])
        );
    }

    #[test]
    fn resources_have_no_references() {
        assert!(references_for(FileKind::Resource, "[gd_resource type=\"TileSet\"]").is_empty());
    }
}
