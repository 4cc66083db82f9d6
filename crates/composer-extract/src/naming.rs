//! Content-shape inference for blocks that carry no path hint.

use std::sync::LazyLock;

use composer_core::{Clock, FileKind, paths};
use regex::Regex;

static NODE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[node name="([^"]+)""#).expect("valid regex"));

static CLASS_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class_name\s+([A-Za-z0-9_]+)").expect("valid regex"));

const SCENE_MARKER: &str = "[gd_scene";
const SCRIPT_MARKERS: &[&str] = &["extends ", "func ", "class_name "];

/// How generated names are spelled. The fast pipeline keeps node names as
/// written and capitalizes fallbacks; the dependency pipeline lowercases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    Lowercase,
    Verbatim,
}

impl NameStyle {
    const fn scene_prefix(self) -> &'static str {
        match self {
            Self::Lowercase => "scene",
            Self::Verbatim => "Scene",
        }
    }

    const fn script_prefix(self) -> &'static str {
        match self {
            Self::Lowercase => "script",
            Self::Verbatim => "Script",
        }
    }

    fn node_file_name(self, node_name: &str) -> String {
        match self {
            Self::Lowercase => node_name.to_lowercase().replace(' ', "_"),
            Self::Verbatim => node_name.to_string(),
        }
    }
}

/// Content opens with a scene header.
pub fn looks_like_scene(content: &str) -> bool {
    content.trim_start().starts_with(SCENE_MARKER)
}

/// Content carries any script keyword.
pub fn looks_like_script(content: &str) -> bool {
    SCRIPT_MARKERS.iter().any(|marker| content.contains(marker))
}

/// Scene path from the first declared node name, else a timestamped name.
pub fn scene_path(content: &str, style: NameStyle, clock: &impl Clock) -> String {
    let stem = NODE_NAME_RE
        .captures(content)
        .map(|caps| style.node_file_name(&caps[1]))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{}_{}", style.scene_prefix(), clock.unix_timestamp()));
    paths::normalize(&format!("{stem}.{}", paths::SCENE_EXTENSION))
}

/// Script path from the declared class name, else a timestamped name.
pub fn script_path(content: &str, style: NameStyle, clock: &impl Clock) -> String {
    let stem = CLASS_NAME_RE.captures(content).map_or_else(
        || format!("{}_{}", style.script_prefix(), clock.unix_timestamp()),
        |caps| caps[1].to_string(),
    );
    paths::normalize(&format!("{stem}.{}", paths::SCRIPT_EXTENSION))
}

/// Timestamped resource path whose extension follows the content shape:
/// `{`/`[` prefix is json, angle brackets are xml, anything else text.
pub fn resource_path(content: &str, clock: &impl Clock) -> String {
    let trimmed = content.trim_start();
    let extension = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        "json"
    } else if content.contains('<') && content.contains('>') {
        "xml"
    } else {
        "txt"
    };
    paths::normalize(&format!("resource_{}.{extension}", clock.unix_timestamp()))
}

/// Target for a block with no hint: scene, then script, then generic resource.
pub fn infer_target(content: &str, style: NameStyle, clock: &impl Clock) -> (String, FileKind) {
    if looks_like_scene(content) {
        (scene_path(content, style, clock), FileKind::Scene)
    } else if looks_like_script(content) {
        (script_path(content, style, clock), FileKind::Script)
    } else {
        (resource_path(content, clock), FileKind::Resource)
    }
}
