//! # mahzan-config
//!
//! Layered configuration loading for Mahzan using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MAHZAN_*` prefix, `__` as separator)
//! 2. Project-level `.mahzan/config.toml`
//! 3. User-level `~/.config/mahzan/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MAHZAN_GATEWAY__URL` -> `gateway.url`,
//! `MAHZAN_PROVIDER__ANON_KEY` -> `provider.anon_key`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use mahzan_config::MahzanConfig;
//!
//! let config = MahzanConfig::load_with_dotenv().expect("config");
//! if config.gateway.is_configured() {
//!     println!("Gateway URL: {}", config.gateway.url);
//! }
//! ```

mod error;
mod gateway;
mod general;
mod provider;

pub use error::ConfigError;
pub use gateway::GatewayConfig;
pub use general::GeneralConfig;
pub use provider::ProviderConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MahzanConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl MahzanConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if figment extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if figment extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".mahzan/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("MAHZAN_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mahzan").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = MahzanConfig::default();
        assert!(!config.gateway.is_configured());
        assert!(!config.provider.is_configured());
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn load_with_dotenv_tolerates_missing_env_file() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let config = MahzanConfig::load_with_dotenv().expect("config loads");
            assert!(!config.gateway.is_configured());
            assert_eq!(config.general.default_limit, 20);
            Ok(())
        });
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let config: MahzanConfig = MahzanConfig::figment().extract()?;
            assert!(!config.gateway.is_configured());
            assert!(!config.provider.is_configured());
            Ok(())
        });
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAHZAN_GATEWAY__URL", "libsql://archive.turso.io");
            jail.set_env("MAHZAN_GATEWAY__AUTH_TOKEN", "token123");
            let config: MahzanConfig = MahzanConfig::figment().extract()?;
            assert!(config.gateway.is_configured());
            assert_eq!(config.gateway.url, "libsql://archive.turso.io");
            Ok(())
        });
    }
}
