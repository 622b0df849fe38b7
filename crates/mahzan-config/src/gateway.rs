//! Remote data gateway (Turso/libSQL) configuration.

use serde::{Deserialize, Serialize};

/// Default sync interval in seconds.
const fn default_sync_interval_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Database URL (e.g., `libsql://archive.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Database auth token.
    #[serde(default)]
    pub auth_token: String,

    /// Local replica path for embedded replica mode.
    #[serde(default)]
    pub local_replica_path: String,

    /// Sync interval for embedded replicas, in seconds.
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    /// Base URL of the hosted backend dashboard, surfaced read-only in
    /// operator instructions (`mhz setup`).
    #[serde(default)]
    pub dashboard_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_replica_path: String::new(),
            sync_interval_secs: default_sync_interval_secs(),
            dashboard_url: String::new(),
        }
    }
}

impl GatewayConfig {
    /// Check if the gateway config has the minimum required fields for remote access.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Check if embedded replica mode is enabled.
    #[must_use]
    pub fn has_local_replica(&self) -> bool {
        !self.local_replica_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = GatewayConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.sync_interval_secs, 60);
        assert!(!config.has_local_replica());
    }

    #[test]
    fn configured_when_url_and_token_set() {
        let config = GatewayConfig {
            url: "libsql://archive.turso.io".into(),
            auth_token: "token123".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn local_replica_detection() {
        let mut config = GatewayConfig::default();
        assert!(!config.has_local_replica());

        config.local_replica_path = "./replica.db".into();
        assert!(config.has_local_replica());
    }
}
