//! Project path convention helpers.
//!
//! Every path the composer tracks is project-root-relative, starts with the
//! `res://` marker exactly once, and uses forward slashes. [`normalize`] is
//! the single ingestion point; the remaining helpers are string slicing over
//! already-normalized paths.

/// Project-root marker every normalized path starts with.
pub const RES_PREFIX: &str = "res://";

pub const SCRIPT_EXTENSION: &str = "gd";
pub const SCENE_EXTENSION: &str = "tscn";
pub const RESOURCE_EXTENSION: &str = "tres";

/// Extensions a scene may legitimately attach as a script.
pub const SCRIPT_SOURCE_EXTENSIONS: &[&str] = &["gd", "cs", "vs"];

/// Canonicalize any path-like string into the `res://` convention.
///
/// Total: every input produces a path that starts with [`RES_PREFIX`] exactly
/// once. Surrounding quotes and backticks are dropped, backslashes become
/// forward slashes, repeated markers collapse, and absolute filesystem paths
/// (`/abs/x`, `C:/abs/x`) are rebased under the project root.
///
/// # Examples
///
/// ```
/// use composer_core::paths::normalize;
/// assert_eq!(normalize("player.gd"), "res://player.gd");
/// assert_eq!(normalize("res://res://player.gd"), "res://player.gd");
/// assert_eq!(normalize("/scenes/main.tscn"), "res://scenes/main.tscn");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let cleaned = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '`' | '\'' | '"'))
        .trim()
        .replace('\\', "/");

    let mut rest = cleaned.as_str();
    loop {
        let before = rest.len();
        if let Some(stripped) = rest.strip_prefix(RES_PREFIX) {
            rest = stripped;
        }
        rest = strip_drive_letter(rest);
        rest = rest.trim_start_matches('/');
        while let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        }
        if rest.len() == before {
            break;
        }
    }

    format!("{RES_PREFIX}{rest}")
}

fn strip_drive_letter(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/')
    {
        &path[2..]
    } else {
        path
    }
}

/// Whether the path already carries the project-root marker.
#[must_use]
pub fn is_project_path(path: &str) -> bool {
    path.starts_with(RES_PREFIX)
}

/// Path with the `res://` marker removed.
#[must_use]
pub fn relative(path: &str) -> &str {
    path.strip_prefix(RES_PREFIX).unwrap_or(path)
}

/// Final path component.
#[must_use]
pub fn file_name(path: &str) -> &str {
    let rel = relative(path);
    rel.rsplit('/').next().unwrap_or(rel)
}

/// Lower-case-insensitive extension of the final component, without the dot.
/// Empty when the file name has no extension.
#[must_use]
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx + 1..],
        _ => "",
    }
}

/// Final component without its extension.
#[must_use]
pub fn base_name(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Full path without the extension of its final component.
#[must_use]
pub fn strip_extension(path: &str) -> &str {
    let ext = extension(path);
    if ext.is_empty() {
        path
    } else {
        &path[..path.len() - ext.len() - 1]
    }
}

/// Sibling path with the extension replaced (or added).
#[must_use]
pub fn with_extension(path: &str, extension: &str) -> String {
    format!("{}.{extension}", strip_extension(path))
}

/// Directory portion of a normalized path. `res://a/b.gd` yields `res://a`,
/// `res://b.gd` yields `res://`.
#[must_use]
pub fn parent(path: &str) -> String {
    let rel = relative(path);
    match rel.rfind('/') {
        Some(idx) => format!("{RES_PREFIX}{}", &rel[..idx]),
        None => RES_PREFIX.to_string(),
    }
}

/// Whether the final component looks like a file name (has an extension that
/// starts with a letter).
#[must_use]
pub fn looks_like_file(path: &str) -> bool {
    extension(path)
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}
