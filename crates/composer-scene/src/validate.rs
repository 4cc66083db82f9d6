use composer_core::CoreError;

use crate::upgrade::{CURRENT_FORMAT, header_format};

/// Structural check for scene documents written by the fast pipeline.
///
/// A scene must open with a `[gd_scene ...]` header declaring the current
/// format and contain at least one `[node ...]` section.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] describing the first failed check.
pub fn validate_scene(content: &str) -> Result<(), CoreError> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("[gd_scene") {
        return Err(CoreError::Validation(
            "scene must start with a [gd_scene] header".into(),
        ));
    }
    if header_format(trimmed) != Some(CURRENT_FORMAT) {
        return Err(CoreError::Validation(format!(
            "scene header must declare format={CURRENT_FORMAT}"
        )));
    }
    if !trimmed.contains("[node") {
        return Err(CoreError::Validation(
            "scene has no [node] section".into(),
        ));
    }
    Ok(())
}
