//! Affiliate publication update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AffiliateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// `Some(None)` clears the website reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl AffiliateUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.logo_url.is_none()
            && self.website_url.is_none()
            && self.description.is_none()
            && self.display_order.is_none()
            && self.active.is_none()
    }
}

pub struct AffiliateUpdateBuilder(AffiliateUpdate);

impl Default for AffiliateUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AffiliateUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AffiliateUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn logo_url(mut self, url: impl Into<String>) -> Self {
        self.0.logo_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn website_url(mut self, url: Option<String>) -> Self {
        self.0.website_url = Some(url);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn display_order(mut self, order: i64) -> Self {
        self.0.display_order = Some(order);
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.0.active = Some(active);
        self
    }

    #[must_use]
    pub fn build(self) -> AffiliateUpdate {
        self.0
    }
}
