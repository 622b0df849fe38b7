//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Default number of featured issues on the home view.
const fn default_featured_limit() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for admin list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// How many featured issues the home view loads.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            featured_limit: default_featured_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.featured_limit, 4);
    }
}
