//! General application configuration.

use composer_core::AssistantMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Whether responses may be written to the project (`composer`) or only
    /// inspected (`ask`).
    #[serde(default)]
    pub mode: AssistantMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.mode, AssistantMode::Ask);
    }
}
