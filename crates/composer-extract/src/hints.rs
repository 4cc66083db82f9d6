//! Explicit path hints in the prose around a block.

use std::sync::LazyLock;

use composer_core::paths;
use regex::Regex;

/// A trigger word or label followed by something file-shaped:
/// `File: x.gd`, `save to ui/hud.tscn`, "creates `player.gd`", ...
static PATH_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:\bfile:|\bpath:|\bfor\s|\bin\s|\bto\s|\bas\s|\bcreates?\b|\bsave[sd]?\b|\bgenerat(?:e|es|ed|ing)\b|\bmake\b|\bwrite\b)\s*(?:the\s+|file\s+|a\s+|an\s+)?[`'"]?((?:res://)?[\w.\-/]+\.[A-Za-z][A-Za-z0-9]*)[`'"]?"#,
    )
    .expect("valid regex")
});

const FAST_HINT_LABEL: &str = "File:";

/// The hint closest to the end of `text`, normalized.
pub fn last_path_hint(text: &str) -> Option<String> {
    PATH_HINT_RE
        .captures_iter(text)
        .last()
        .map(|caps| paths::normalize(&caps[1]))
}

/// The first hint anywhere in `text`, normalized.
pub fn first_path_hint(text: &str) -> Option<String> {
    PATH_HINT_RE
        .captures(text)
        .map(|caps| paths::normalize(&caps[1]))
}

/// The remainder of the line after the last `File:` label, normalized.
pub fn file_label_hint(text: &str) -> Option<String> {
    let start = text.rfind(FAST_HINT_LABEL)? + FAST_HINT_LABEL.len();
    let line = text[start..].lines().next().unwrap_or_default().trim();
    (!line.is_empty()).then(|| paths::normalize(line))
}
