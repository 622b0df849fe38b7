//! Archive listing filter.
//!
//! Pure predicate logic over issue collections. The data source delivers
//! issues pre-sorted (year descending, then month descending); filtering
//! preserves that order and never re-sorts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Issue;

/// Transient filter criteria for the archive listing.
///
/// All criteria combine with AND semantics; an absent criterion matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueFilter {
    /// Case-insensitive substring matched against title and description.
    pub query: String,
    /// Exact issue year.
    pub year: Option<i32>,
    /// Exact issue month (1-12).
    pub month: Option<u8>,
}

impl IssueFilter {
    /// Whether any criterion is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.year.is_some() || self.month.is_some()
    }

    /// Whether a single issue satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if !self.query.is_empty() {
            let query = self.query.to_lowercase();
            let hit = issue.title.to_lowercase().contains(&query)
                || issue.description.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(year) = self.year
            && issue.issue_year != year
        {
            return false;
        }
        if let Some(month) = self.month
            && issue.issue_month != month
        {
            return false;
        }
        true
    }

    /// Filter a pre-sorted issue slice, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        issues.iter().filter(|issue| self.matches(issue)).collect()
    }
}

/// UI state for the archive view: criteria plus the current page index.
///
/// Changing any criterion resets the page to 1, matching the contract that a
/// filter change never leaves the reader stranded on a page that no longer
/// exists.
#[derive(Debug, Clone)]
pub struct ArchiveViewState {
    filter: IssueFilter,
    page: usize,
}

impl Default for ArchiveViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveViewState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: IssueFilter::default(),
            page: 1,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &IssueFilter {
        &self.filter
    }

    /// Current page index (1-based).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Move to a page. Callers clamp against `total_pages` before display.
    pub const fn set_page(&mut self, page: usize) {
        self.page = if page == 0 { 1 } else { page };
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.page = 1;
    }

    pub const fn set_year(&mut self, year: Option<i32>) {
        self.filter.year = year;
        self.page = 1;
    }

    pub const fn set_month(&mut self, month: Option<u8>) {
        self.filter.month = month;
        self.page = 1;
    }

    /// Clear all criteria (also resets the page).
    pub fn clear_filters(&mut self) {
        self.filter = IssueFilter::default();
        self.page = 1;
    }
}

/// Distinct issue years present in a collection, newest first.
///
/// Feeds the year selector in the archive view.
#[must_use]
pub fn available_years(issues: &[Issue]) -> Vec<i32> {
    let mut years: Vec<i32> = issues.iter().map(|issue| issue.issue_year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}
