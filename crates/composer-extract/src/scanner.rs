//! Prose dependency scanning.
//!
//! Assistants often mention files they never show ("you'll also need a
//! `player.gd` script"). The scanner turns those mentions into pending table
//! entries so the scheduler can synthesize placeholders for them.

use std::sync::LazyLock;

use composer_core::{DependencyEntry, DependencyTable, FileKind, paths};
use composer_scene::placeholder;
use regex::Regex;

/// "create/need/uses ... <name>.<known ext>"
static RESOURCE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:create|creates|need|needs|requires?|missing|using|include|import|load|add|generate|make)\s+(?:(?:a|an|the)\s+)?(?:new\s+)?(?:(?:file|script|scene|resource|subscene|tileset|asset|shader)\s+)?(?:(?:called|named)\s+)?[`'"]?((?:res://)?[\w.\-/]+\.(?:tres|tscn|gd|res|import|shader|gdshader))\b"#,
    )
    .expect("valid regex")
});

/// "create a script called Foo" with the extension implied by the noun.
static NAMED_KIND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:create|need|needs|requires?|add|make|generate)\s+(?:(?:a|an|the)\s+)?(?:new\s+)?(script|scene|tileset|resource|shader)\s+(?:called|named)\s+[`'"]?((?:res://)?[\w\-/]+(?:\.[A-Za-z]\w*)?)"#,
    )
    .expect("valid regex")
});

/// "<noun> scene called Foo" / "<noun> scene `Foo`"
static SUBSCENE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:player|character|enemy|item|ui|menu|hud|level|world|button|panel|container|node)\s+(?:scene|subscene|component)\s+(?:(?:called|named)\s+[`'"]?([\w\-/]+)|[`'"]([\w\-/]+)[`'"])"#,
    )
    .expect("valid regex")
});

/// "create the following files:" and the block of lines after it, up to a
/// blank line or the end of the response.
static FILE_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:create|make|generate|need)\s+(?:the\s+)?(?:following|these)\s+(?:files|scenes|scripts)\s*:[ \t]*\r?\n?((?s:.*?))(?:\r?\n[ \t]*\r?\n|\z)",
    )
    .expect("valid regex")
});

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*(?:[-*•]|\d+\.)[ \t]*[`'"]?((?:res://)?[\w\-/]+(?:\.\w+)?)"#)
        .expect("valid regex")
});

/// "refers to the script `x`", "depends on the scene 'y'", ...
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:refer(?:s|ring)?\s+to|depend(?:s|ing)?\s+on|based\s+on|needs|using)\s+(?:(?:the|a|an)\s+)?(script|scene|resource|file)\s+[`'"]((?:res://)?[\w\-/.]+)[`'"]"#,
    )
    .expect("valid regex")
});

/// Base class of the companion script paired with a scanned scene.
const COMPANION_SCRIPT_BASE: &str = "Node2D";

/// One file the prose implies.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    path: String,
    kind: FileKind,
    /// Pair a placeholder script with this scene.
    companion_script: bool,
}

impl Candidate {
    fn from_name(name: &str, default_kind: FileKind) -> Self {
        let path = if paths::looks_like_file(name) {
            paths::normalize(name)
        } else {
            paths::normalize(&paths::with_extension(name, default_kind.default_extension()))
        };
        Self {
            kind: FileKind::from_path(&path),
            path,
            companion_script: false,
        }
    }

    /// Name whose extension is implied by the noun it was introduced with.
    /// Shaders become `.gdshader`; tilesets and other resources `.tres`.
    fn from_noun(noun: &str, name: &str) -> Self {
        if noun.eq_ignore_ascii_case("shader") && !paths::looks_like_file(name) {
            let path = paths::normalize(&paths::with_extension(name, "gdshader"));
            return Self {
                path,
                kind: FileKind::Resource,
                companion_script: false,
            };
        }
        Self::from_name(name, kind_for_noun(noun))
    }

    const fn with_companion(mut self, companion: bool) -> Self {
        self.companion_script = companion;
        self
    }
}

/// Records files mentioned in prose as pending dependency entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyScanner;

impl DependencyScanner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Scan `response` and add a pending entry for every implied file that is
    /// neither tracked in `table` nor reported present by `exists`.
    ///
    /// Existing entries are never touched, so rescanning the same response
    /// adds nothing. Returns the number of entries added.
    pub fn scan(
        &self,
        response: &str,
        table: &mut DependencyTable,
        exists: impl Fn(&str) -> bool,
    ) -> usize {
        let mut added = 0;
        for candidate in Self::candidates(response) {
            if table.contains(&candidate.path) || exists(&candidate.path) {
                continue;
            }

            tracing::debug!(path = %candidate.path, kind = %candidate.kind, "scanned dependency");
            let scene_path = candidate.path.clone();
            table.insert(DependencyEntry::pending(candidate.path, candidate.kind));
            added += 1;

            if candidate.kind == FileKind::Scene && candidate.companion_script {
                let script_path = paths::with_extension(&scene_path, paths::SCRIPT_EXTENSION);
                if !table.contains(&script_path) && !exists(&script_path) {
                    tracing::debug!(path = %script_path, "companion script for scanned scene");
                    table.insert(DependencyEntry::with_content(
                        script_path,
                        FileKind::Script,
                        placeholder::script(COMPANION_SCRIPT_BASE),
                    ));
                    added += 1;
                }
            }
        }
        added
    }

    /// Every candidate the rules produce, in rule order. Duplicates are left
    /// in; the table check drops them.
    fn candidates(response: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for caps in RESOURCE_PHRASE_RE.captures_iter(response) {
            candidates.push(Candidate::from_name(&caps[1], FileKind::Resource));
        }

        for caps in NAMED_KIND_RE.captures_iter(response) {
            candidates.push(Candidate::from_noun(&caps[1], &caps[2]));
        }

        for caps in SUBSCENE_RE.captures_iter(response) {
            if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
                candidates.push(
                    Candidate::from_name(name.as_str(), FileKind::Scene).with_companion(true),
                );
            }
        }

        for list in FILE_LIST_RE.captures_iter(response) {
            let body = &list[1];
            let skip_scripts = body.to_lowercase().contains("no script");
            for line in body.lines() {
                let Some(item) = LIST_ITEM_RE.captures(line) else {
                    continue;
                };
                let name = &item[1];
                let line_lower = line.to_lowercase();
                let default_kind = if (line_lower.contains("script") && !line_lower.contains("no script"))
                    || name.contains("Controller")
                    || name.contains("Manager")
                {
                    FileKind::Script
                } else {
                    FileKind::Scene
                };
                candidates.push(
                    Candidate::from_name(name, default_kind).with_companion(!skip_scripts),
                );
            }
        }

        let response_lower = response.to_lowercase();
        for caps in DESCRIPTION_RE.captures_iter(response) {
            let name = &caps[2];
            let noun = caps[1].to_ascii_lowercase();
            let default_kind = if noun == "file" {
                let script_mention = format!("{}.{}", name.to_lowercase(), paths::SCRIPT_EXTENSION);
                if response_lower.contains(&script_mention) {
                    FileKind::Script
                } else {
                    FileKind::Scene
                }
            } else {
                kind_for_noun(&noun)
            };
            candidates.push(Candidate::from_name(name, default_kind));
        }

        candidates
    }
}

fn kind_for_noun(noun: &str) -> FileKind {
    match noun.to_ascii_lowercase().as_str() {
        "script" => FileKind::Script,
        "scene" => FileKind::Scene,
        _ => FileKind::Resource,
    }
}
