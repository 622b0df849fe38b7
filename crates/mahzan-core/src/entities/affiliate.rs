use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A related external publication listed for cross-promotion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AffiliatePublication {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    pub description: String,
    /// Stable sort key for listing order (ascending).
    pub display_order: i64,
    /// Inactive publications are hidden from public views but kept for admin.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
