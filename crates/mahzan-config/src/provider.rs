//! Identity provider configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Base URL of the hosted identity provider.
    #[serde(default)]
    pub url: String,

    /// Public (anonymous) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
}

impl ProviderConfig {
    /// Check if the provider config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}
