//! Issue update builder.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl IssueUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.cover_image_url.is_none()
            && self.pdf_url.is_none()
            && self.issue_month.is_none()
            && self.issue_year.is_none()
            && self.publish_date.is_none()
            && self.featured.is_none()
    }
}

pub struct IssueUpdateBuilder(IssueUpdate);

impl Default for IssueUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(IssueUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn cover_image_url(mut self, url: impl Into<String>) -> Self {
        self.0.cover_image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn pdf_url(mut self, url: impl Into<String>) -> Self {
        self.0.pdf_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn issue_month(mut self, month: u8) -> Self {
        self.0.issue_month = Some(month);
        self
    }

    #[must_use]
    pub const fn issue_year(mut self, year: i32) -> Self {
        self.0.issue_year = Some(year);
        self
    }

    #[must_use]
    pub const fn publish_date(mut self, date: NaiveDate) -> Self {
        self.0.publish_date = Some(date);
        self
    }

    #[must_use]
    pub const fn featured(mut self, featured: bool) -> Self {
        self.0.featured = Some(featured);
        self
    }

    #[must_use]
    pub fn build(self) -> IssueUpdate {
        self.0
    }
}
