use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Profile record owned by the identity provider.
///
/// The administrator capability lives here as a plain boolean, distinct from
/// mere authentication. Promotion happens out of band (see `mhz setup`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
