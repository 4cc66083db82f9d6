//! Placeholder documents for files that were referenced but never provided.
//!
//! Type inference is keyword based on the file's base name; a placeholder
//! only has to load, not to be useful.

use composer_core::paths;

/// First line of every generated script placeholder.
pub const PLACEHOLDER_MARKER: &str = "# Generated by composer as a dependency placeholder";

/// Id used for the script `ext_resource` inside scene placeholders.
pub const SCRIPT_RESOURCE_ID: &str = "1_script";

fn name_has_any(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

/// Base class for a script placeholder named `name`.
#[must_use]
pub fn infer_script_base(name: &str) -> &'static str {
    if name_has_any(name, &["player", "character", "enemy"]) {
        "CharacterBody2D"
    } else if name_has_any(name, &["ui", "menu", "button"]) {
        "Control"
    } else if name_has_any(name, &["sprite"]) {
        "Sprite2D"
    } else if name_has_any(name, &["3d"]) {
        "Node3D"
    } else if name_has_any(name, &["resource"]) {
        "Resource"
    } else {
        "Node"
    }
}

/// Root node type for a scene placeholder named `name`.
#[must_use]
pub fn infer_scene_root(name: &str) -> &'static str {
    if name_has_any(name, &["control", "panel", "ui", "menu"]) {
        "Control"
    } else if name_has_any(name, &["sprite"]) {
        "Sprite2D"
    } else if name_has_any(name, &["player", "character", "enemy"]) {
        "CharacterBody2D"
    } else if name_has_any(name, &["3d"]) {
        "Node3D"
    } else if name_has_any(name, &["tile", "map"]) {
        "TileMap"
    } else {
        "Node2D"
    }
}

/// Resource class for a `.tres` placeholder named `name`.
#[must_use]
pub fn infer_resource_type(name: &str) -> &'static str {
    if name_has_any(name, &["tileset", "tile_set", "tiles"]) {
        "TileSet"
    } else if name_has_any(name, &["theme"]) {
        "Theme"
    } else if name_has_any(name, &["material"]) {
        "Material"
    } else if name_has_any(name, &["font"]) {
        "Font"
    } else if name_has_any(name, &["texture", "image"]) {
        "Texture2D"
    } else {
        "Resource"
    }
}

/// Minimal script extending `base`.
#[must_use]
pub fn script(base: &str) -> String {
    format!("{PLACEHOLDER_MARKER}\nextends {base}\n\nfunc _ready():\n\tpass\n")
}

/// Script placeholder for `path`, with the base class inferred from its name.
#[must_use]
pub fn script_for(path: &str) -> String {
    script(infer_script_base(paths::base_name(path)))
}

/// Scene placeholder for `path` with one root node named after the file.
///
/// When `script_path` is given the root node gets it attached through an
/// `ext_resource` declaration.
#[must_use]
pub fn scene_for(path: &str, uid: &str, script_path: Option<&str>) -> String {
    let name = paths::base_name(path);
    let root = infer_scene_root(name);

    match script_path {
        Some(script) => format!(
            "[gd_scene load_steps=2 format=3 uid=\"{uid}\"]\n\n\
             [ext_resource type=\"Script\" path=\"{script}\" id=\"{SCRIPT_RESOURCE_ID}\"]\n\n\
             [node name=\"{name}\" type=\"{root}\"]\n\
             script = ExtResource(\"{SCRIPT_RESOURCE_ID}\")\n"
        ),
        None => format!("[gd_scene format=3 uid=\"{uid}\"]\n\n[node name=\"{name}\" type=\"{root}\"]\n"),
    }
}

/// Resource placeholder for `path`, or `None` when the extension has no
/// template (only `.tres` does).
#[must_use]
pub fn resource_for(path: &str) -> Option<String> {
    if !paths::extension(path).eq_ignore_ascii_case(paths::RESOURCE_EXTENSION) {
        return None;
    }
    let resource_type = infer_resource_type(paths::base_name(path));
    let mut document = format!("[gd_resource type=\"{resource_type}\" format=3]\n\n[resource]\n");
    if resource_type == "TileSet" {
        document.push_str("tile_shape = 0\n");
    }
    Some(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::references::scene_references;
    use crate::validate::validate_scene;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("PlayerController", "CharacterBody2D")]
    #[case("main_menu", "Control")]
    #[case("sprite_fx", "Sprite2D")]
    #[case("world3d", "Node3D")]
    #[case("item_resource", "Resource")]
    #[case("game_state", "Node")]
    fn script_bases(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(infer_script_base(name), expected);
    }

    #[rstest]
    #[case("HudPanel", "Control")]
    #[case("Player", "CharacterBody2D")]
    #[case("level_map", "TileMap")]
    #[case("Level", "Node2D")]
    fn scene_roots(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(infer_scene_root(name), expected);
    }

    #[test]
    fn script_placeholder_shape() {
        assert_eq!(
            script("Node2D"),
            "# Generated by composer as a dependency placeholder\nextends Node2D\n\nfunc _ready():\n\tpass\n"
        );
        assert!(script_for("res://enemy.gd").contains("extends CharacterBody2D"));
    }

    #[test]
    fn scene_placeholder_without_script() {
        let scene = scene_for("res://levels/Level.tscn", "uid://abc", None);
        assert_eq!(
            scene,
            "[gd_scene format=3 uid=\"uid://abc\"]\n\n[node name=\"Level\" type=\"Node2D\"]\n"
        );
        assert!(validate_scene(&scene).is_ok());
    }

    #[test]
    fn scene_placeholder_links_script() {
        let scene = scene_for("res://Player.tscn", "uid://abc", Some("res://Player.gd"));
        assert!(scene.contains("[ext_resource type=\"Script\" path=\"res://Player.gd\" id=\"1_script\"]"));
        assert!(scene.contains("[node name=\"Player\" type=\"CharacterBody2D\"]\nscript = ExtResource(\"1_script\")"));
        assert!(validate_scene(&scene).is_ok());
        assert_eq!(
            scene_references(&scene).into_iter().collect::<Vec<_>>(),
            vec!["res://Player.gd".to_string()]
        );
    }

    #[test]
    fn tileset_resource_placeholder() {
        assert_eq!(
            resource_for("res://tiles/ground_tileset.tres").as_deref(),
            Some("[gd_resource type=\"TileSet\" format=3]\n\n[resource]\ntile_shape = 0\n")
        );
        assert_eq!(
            resource_for("res://ui/theme.tres").as_deref(),
            Some("[gd_resource type=\"Theme\" format=3]\n\n[resource]\n")
        );
    }

    #[rstest]
    #[case("res://icon.png")]
    #[case("res://data.json")]
    #[case("res://water.gdshader")]
    fn non_tres_resources_have_no_template(#[case] path: &str) {
        assert_eq!(resource_for(path), None);
    }
}
