//! Legacy scene upgrade.
//!
//! Rewrites scene documents written for older engine versions into the
//! current text format. Every step is a targeted regex rewrite, so running the
//! upgrade on already-current content is a no-op.

use std::collections::HashSet;
use std::sync::LazyLock;

use composer_core::ids::generate_uid;
use composer_core::paths::{self, SCRIPT_EXTENSION, SCRIPT_SOURCE_EXTENSIONS};
use rand::Rng;
use regex::{Captures, Regex};

/// Format version written by the current engine.
pub const CURRENT_FORMAT: u32 = 3;

const COLLECTION_RENAMES: &[(&str, &str)] = &[
    ("PoolByteArray", "PackedByteArray"),
    ("PoolIntArray", "PackedInt32Array"),
    ("PoolRealArray", "PackedFloat32Array"),
    ("PoolStringArray", "PackedStringArray"),
    ("PoolVector2Array", "PackedVector2Array"),
    ("PoolVector3Array", "PackedVector3Array"),
    ("PoolColorArray", "PackedColorArray"),
];

const NODE_TYPE_RENAMES: &[(&str, &str)] = &[
    ("Spatial", "Node3D"),
    ("KinematicBody", "CharacterBody3D"),
    ("KinematicBody2D", "CharacterBody2D"),
    ("RigidBody", "RigidBody3D"),
    ("StaticBody", "StaticBody3D"),
    ("MeshInstance", "MeshInstance3D"),
    ("Sprite", "Sprite2D"),
    ("AnimatedSprite", "AnimatedSprite2D"),
    ("CollisionShape", "CollisionShape3D"),
    ("CollisionPolygon", "CollisionPolygon3D"),
    ("Camera", "Camera3D"),
    ("Light", "Light3D"),
    ("DirectionalLight", "DirectionalLight3D"),
    ("OmniLight", "OmniLight3D"),
    ("SpotLight", "SpotLight3D"),
    ("Position3D", "Marker3D"),
    ("Position2D", "Marker2D"),
    ("Area", "Area3D"),
    ("RayCast", "RayCast3D"),
    ("Particles", "GPUParticles3D"),
    ("Particles2D", "GPUParticles2D"),
    ("Navigation2D", "Node2D"),
    ("SpatialMaterial", "StandardMaterial3D"),
    ("ToolButton", "Button"),
];

const PROPERTY_RENAMES: &[(&str, &str)] = &[
    ("use_in_baked_light", "bake_mode"),
    ("z/z", "z_index"),
    ("xy_scale", "scale"),
];

const LEGACY_PROPERTY_PREFIX: &str = "transform/";

static FILE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[(gd_scene|gd_resource)([^\]\n]*)\]").expect("valid regex")
});

static FORMAT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bformat\s*=\s*(\d+)").expect("valid regex"));

static UID_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\buid\s*=").expect("valid regex"));

static NUMERIC_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(ExtResource|SubResource)\(\s*(\d+)\s*\)").expect("valid regex")
});

static NUMERIC_HEADER_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\[(?:ext_resource|sub_resource)\b[^\]\n]*\bid\s*=\s*)(\d+)")
        .expect("valid regex")
});

static DOUBLE_QUOTED_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(ExtResource|SubResource)\(\s*""([^"]*)""\s*\)"#).expect("valid regex")
});

static TYPE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btype\s*=\s*"([A-Za-z0-9_]+)""#).expect("valid regex"));

/// A quoted string (skipped) or a capitalized bare identifier.
static STRING_OR_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|\b[A-Z][A-Za-z0-9_]*\b"#).expect("valid regex")
});

static PROPERTY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Za-z_][A-Za-z0-9_/]*)(\s*=)").expect("valid regex")
});

static EXT_RESOURCE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\[ext_resource\b[^\]\n]*\bid\s*=\s*"([^"]+)""#).expect("valid regex")
});

static SCRIPT_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bscript\s*=\s*ExtResource\(\s*"([^"]+)"\s*\)"#).expect("valid regex")
});

static ID_SHAPED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:_\w+)?$").expect("valid regex"));

/// Format version declared in the document's `[gd_scene]`/`[gd_resource]`
/// header, if any.
#[must_use]
pub fn header_format(content: &str) -> Option<u32> {
    let header = FILE_HEADER_RE.captures(content)?;
    FORMAT_ATTR_RE
        .captures(&header[2])
        .and_then(|caps| caps[1].parse().ok())
}

/// Whether the document declares a format older than [`CURRENT_FORMAT`].
#[must_use]
pub fn needs_upgrade(content: &str) -> bool {
    header_format(content).is_some_and(|format| format < CURRENT_FORMAT)
}

/// Rewrite a legacy scene document into the current format.
///
/// Steps, in order:
/// 1. header: format raised to 3 (added if missing), uid added if missing
/// 2. numeric resource references quoted: `ExtResource(1)` -> `ExtResource("1")`
/// 3. doubly-quoted references collapsed: `ExtResource(""x"")` -> `ExtResource("x")`
/// 4. `Pool*Array` collections renamed to `Packed*Array`
/// 5. legacy node class names renamed (quoted strings other than `type="..."` untouched)
/// 6. legacy property keys renamed at line start
/// 7. script references without a source extension get `.gd`
pub fn upgrade<R: Rng + ?Sized>(content: &str, rng: &mut R) -> String {
    let upgraded = upgrade_header(content, rng);
    let upgraded = quote_numeric_references(&upgraded);
    let upgraded = DOUBLE_QUOTED_REFERENCE_RE.replace_all(&upgraded, r#"$1("$2")"#);
    let upgraded = rename_collections(&upgraded);
    let upgraded = rename_node_types(&upgraded);
    let upgraded = rename_properties(&upgraded);
    let upgraded = fix_script_extensions(&upgraded);

    if upgraded != content {
        tracing::debug!(
            before = content.len(),
            after = upgraded.len(),
            "upgraded legacy scene"
        );
    }
    upgraded
}

fn upgrade_header<R: Rng + ?Sized>(content: &str, rng: &mut R) -> String {
    FILE_HEADER_RE
        .replace(content, |caps: &Captures<'_>| {
            let tag = &caps[1];
            let mut attrs = caps[2].to_string();

            let format_span = match FORMAT_ATTR_RE.captures(&attrs) {
                Some(found) => {
                    let whole = found.get(0).map_or(0..0, |m| m.range());
                    let outdated = found[1]
                        .parse::<u32>()
                        .is_ok_and(|version| version < CURRENT_FORMAT);
                    if outdated {
                        let replacement = format!("format={CURRENT_FORMAT}");
                        attrs.replace_range(whole.clone(), &replacement);
                        whole.start..whole.start + replacement.len()
                    } else {
                        whole
                    }
                }
                None => {
                    let inserted = format!(" format={CURRENT_FORMAT}");
                    attrs.insert_str(0, &inserted);
                    1..inserted.len()
                }
            };

            if tag == "gd_scene" && !UID_ATTR_RE.is_match(&attrs) {
                let uid = format!(" uid=\"{}\"", generate_uid(rng));
                attrs.insert_str(format_span.end, &uid);
            }

            format!("[{tag}{attrs}]")
        })
        .into_owned()
}

fn quote_numeric_references(content: &str) -> String {
    let quoted = NUMERIC_REFERENCE_RE.replace_all(content, r#"$1("$2")"#);
    NUMERIC_HEADER_ID_RE
        .replace_all(&quoted, r#"${1}"${2}""#)
        .into_owned()
}

fn rename_collections(content: &str) -> String {
    COLLECTION_RENAMES
        .iter()
        .fold(content.to_string(), |acc, (legacy, current)| {
            acc.replace(legacy, current)
        })
}

fn renamed_node_type(name: &str) -> Option<&'static str> {
    NODE_TYPE_RENAMES
        .iter()
        .find(|(legacy, _)| *legacy == name)
        .map(|(_, current)| *current)
}

fn rename_node_types(content: &str) -> String {
    let typed = TYPE_ATTR_RE.replace_all(content, |caps: &Captures<'_>| {
        renamed_node_type(&caps[1]).map_or_else(
            || caps[0].to_string(),
            |current| caps[0].replacen(&caps[1], current, 1),
        )
    });

    STRING_OR_IDENT_RE
        .replace_all(&typed, |caps: &Captures<'_>| {
            let token = &caps[0];
            if token.starts_with('"') {
                return token.to_string();
            }
            renamed_node_type(token).unwrap_or(token).to_string()
        })
        .into_owned()
}

/// Every leading `transform/` segment is dropped before the rename table is
/// consulted, so one pass leaves no legacy key behind.
fn rename_properties(content: &str) -> String {
    PROPERTY_KEY_RE
        .replace_all(content, |caps: &Captures<'_>| {
            let mut key = &caps[1];
            while let Some(rest) = key
                .strip_prefix(LEGACY_PROPERTY_PREFIX)
                .filter(|rest| !rest.is_empty())
            {
                key = rest;
            }
            let renamed = PROPERTY_RENAMES
                .iter()
                .find(|(legacy, _)| *legacy == key)
                .map_or(key, |(_, current)| *current);
            format!("{renamed}{}", &caps[2])
        })
        .into_owned()
}

fn fix_script_extensions(content: &str) -> String {
    let declared_ids: HashSet<&str> = EXT_RESOURCE_ID_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    SCRIPT_REFERENCE_RE
        .replace_all(content, |caps: &Captures<'_>| {
            let argument = &caps[1];
            let has_source_extension = SCRIPT_SOURCE_EXTENSIONS
                .iter()
                .any(|ext| paths::extension(argument).eq_ignore_ascii_case(ext));
            if has_source_extension
                || declared_ids.contains(argument)
                || ID_SHAPED_RE.is_match(argument)
            {
                caps[0].to_string()
            } else {
                caps[0].replacen(argument, &format!("{argument}.{SCRIPT_EXTENSION}"), 1)
            }
        })
        .into_owned()
}
