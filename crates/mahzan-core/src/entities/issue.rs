use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One published edition of the periodical (metadata plus asset references).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover_image_url: String,
    pub pdf_url: String,
    /// Calendar month of the issue: 1 (January) to 12 (December).
    pub issue_month: u8,
    pub issue_year: i32,
    /// Publication date, used for strict prev/next ordering.
    pub publish_date: NaiveDate,
    /// Whether the issue is promoted on the home view.
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
