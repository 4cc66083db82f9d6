//! Materialization pipeline switches.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct PipelineConfig {
    /// Use the fast block-by-block path instead of the dependency-aware one.
    #[serde(default)]
    pub fast_path: bool,

    /// Reject scene blocks that are not current-format or declare no node
    /// (fast path only).
    #[serde(default = "default_true")]
    pub validate_scenes: bool,

    /// Rewrite legacy-format scenes before writing them.
    #[serde(default = "default_true")]
    pub upgrade_legacy_scenes: bool,

    /// Flag an entry as materialized even when its write failed.
    #[serde(default)]
    pub mark_failed_as_materialized: bool,

    /// Report scene reference cycles as warnings.
    #[serde(default = "default_true")]
    pub detect_cycles: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fast_path: false,
            validate_scenes: default_true(),
            upgrade_legacy_scenes: default_true(),
            mark_failed_as_materialized: false,
            detect_cycles: default_true(),
        }
    }
}
