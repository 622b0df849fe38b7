//! Issue repository: CRUD, home-view reads, and publish-date adjacency.

use chrono::{NaiveDate, Utc};

use mahzan_core::entities::Issue;
use mahzan_core::month::validate_issue_date;

use crate::ArchiveDb;
use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_date, parse_datetime};
use crate::updates::issue::IssueUpdate;

const ID_PREFIX: &str = "iss";

const SELECT_COLS: &str = "id, title, description, cover_image_url, pdf_url, issue_month, \
     issue_year, publish_date, featured, created_at, updated_at";

fn row_to_issue(row: &libsql::Row) -> Result<Issue, DatabaseError> {
    let month = row.get::<i64>(5)?;
    Ok(Issue {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        cover_image_url: row.get(3)?,
        pdf_url: row.get(4)?,
        issue_month: u8::try_from(month)
            .map_err(|_| DatabaseError::InvalidState(format!("issue_month out of range: {month}")))?,
        issue_year: i32::try_from(row.get::<i64>(6)?)
            .map_err(|e| DatabaseError::InvalidState(format!("issue_year out of range: {e}")))?,
        publish_date: parse_date(&row.get::<String>(7)?)?,
        featured: get_bool(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

async fn collect_issues(mut rows: libsql::Rows) -> Result<Vec<Issue>, DatabaseError> {
    let mut issues = Vec::new();
    while let Some(row) = rows.next().await? {
        issues.push(row_to_issue(&row)?);
    }
    Ok(issues)
}

/// New-issue payload, mirroring the admin form fields.
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub cover_image_url: String,
    pub pdf_url: String,
    pub issue_month: u8,
    pub issue_year: i32,
    pub publish_date: NaiveDate,
    pub featured: bool,
}

impl ArchiveDb {
    /// Insert a new issue. The gateway generates the id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an out-of-range month or year
    /// before any SQL runs, or `DatabaseError` if the insert fails.
    pub async fn create_issue(&self, draft: IssueDraft) -> Result<Issue, DatabaseError> {
        validate_issue_date(draft.issue_month, draft.issue_year)
            .map_err(|e| DatabaseError::Validation(e.to_string()))?;

        let now = Utc::now();
        let id = self.generate_id(ID_PREFIX).await?;

        self.conn()
            .execute(
                "INSERT INTO magazine_issues \
                 (id, title, description, cover_image_url, pdf_url, issue_month, issue_year, \
                  publish_date, featured, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    id.as_str(),
                    draft.title.as_str(),
                    draft.description.as_str(),
                    draft.cover_image_url.as_str(),
                    draft.pdf_url.as_str(),
                    i64::from(draft.issue_month),
                    i64::from(draft.issue_year),
                    draft.publish_date.format("%Y-%m-%d").to_string(),
                    i64::from(draft.featured),
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .await?;

        Ok(Issue {
            id,
            title: draft.title,
            description: draft.description,
            cover_image_url: draft.cover_image_url,
            pdf_url: draft.pdf_url,
            issue_month: draft.issue_month,
            issue_year: draft.issue_year,
            publish_date: draft.publish_date,
            featured: draft.featured,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch one issue by id. `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_issue(&self, id: &str) -> Result<Option<Issue>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM magazine_issues WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_issue(&row)?)),
            None => Ok(None),
        }
    }

    /// All issues in archive order: year descending, then month descending.
    ///
    /// The archive view filters this collection client-side; no re-sorting
    /// happens downstream.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_issues(&self) -> Result<Vec<Issue>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM magazine_issues \
                     ORDER BY issue_year DESC, issue_month DESC"
                ),
                (),
            )
            .await?;
        collect_issues(rows).await
    }

    /// All issues ordered by publish date descending (admin listing).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_issues_by_publish_date(&self) -> Result<Vec<Issue>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM magazine_issues ORDER BY publish_date DESC"
                ),
                (),
            )
            .await?;
        collect_issues(rows).await
    }

    /// Most recently published issue, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn latest_issue(&self) -> Result<Option<Issue>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM magazine_issues \
                     ORDER BY publish_date DESC LIMIT 1"
                ),
                (),
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_issue(&row)?)),
            None => Ok(None),
        }
    }

    /// Featured issues, newest first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn featured_issues(&self, limit: u32) -> Result<Vec<Issue>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM magazine_issues \
                     WHERE featured = 1 ORDER BY publish_date DESC LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        collect_issues(rows).await
    }

    /// The issue with the greatest publish date strictly before `date`.
    ///
    /// `None` means `date` belongs to the first issue, which is a terminal
    /// state, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn previous_issue(&self, date: NaiveDate) -> Result<Option<Issue>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM magazine_issues \
                     WHERE publish_date < ?1 ORDER BY publish_date DESC LIMIT 1"
                ),
                [date.format("%Y-%m-%d").to_string()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_issue(&row)?)),
            None => Ok(None),
        }
    }

    /// The issue with the smallest publish date strictly after `date`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn next_issue(&self, date: NaiveDate) -> Result<Option<Issue>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM magazine_issues \
                     WHERE publish_date > ?1 ORDER BY publish_date ASC LIMIT 1"
                ),
                [date.format("%Y-%m-%d").to_string()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_issue(&row)?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update and return the updated issue.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an out-of-range month or year,
    /// `DatabaseError::NoResult` if the id does not exist, or `DatabaseError`
    /// if the update fails.
    pub async fn update_issue(
        &self,
        issue_id: &str,
        update: IssueUpdate,
    ) -> Result<Issue, DatabaseError> {
        if let Some(month) = update.issue_month
            && !(1..=12).contains(&month)
        {
            return Err(DatabaseError::Validation(format!(
                "issue_month must be 1-12, got {month}"
            )));
        }
        if let Some(year) = update.issue_year
            && year <= 0
        {
            return Err(DatabaseError::Validation(format!(
                "issue_year must be positive, got {year}"
            )));
        }

        if update.is_empty() {
            return self
                .get_issue(issue_id)
                .await?
                .ok_or(DatabaseError::NoResult);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().into());
            idx += 1;
        }
        if let Some(ref url) = update.cover_image_url {
            sets.push(format!("cover_image_url = ?{idx}"));
            params.push(url.clone().into());
            idx += 1;
        }
        if let Some(ref url) = update.pdf_url {
            sets.push(format!("pdf_url = ?{idx}"));
            params.push(url.clone().into());
            idx += 1;
        }
        if let Some(month) = update.issue_month {
            sets.push(format!("issue_month = ?{idx}"));
            params.push(i64::from(month).into());
            idx += 1;
        }
        if let Some(year) = update.issue_year {
            sets.push(format!("issue_year = ?{idx}"));
            params.push(i64::from(year).into());
            idx += 1;
        }
        if let Some(date) = update.publish_date {
            sets.push(format!("publish_date = ?{idx}"));
            params.push(date.format("%Y-%m-%d").to_string().into());
            idx += 1;
        }
        if let Some(featured) = update.featured {
            sets.push(format!("featured = ?{idx}"));
            params.push(i64::from(featured).into());
            idx += 1;
        }

        let now = Utc::now();
        sets.push(format!("updated_at = ?{idx}"));
        params.push(now.to_rfc3339().into());
        idx += 1;

        params.push(issue_id.into());
        let sql = format!(
            "UPDATE magazine_issues SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        tracing::debug!(issue_id, %sql, "updating issue");
        self.conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.get_issue(issue_id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Delete an issue by id. Deleting a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_issue(&self, issue_id: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute("DELETE FROM magazine_issues WHERE id = ?1", [issue_id])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::test_db;
    use crate::updates::issue::IssueUpdateBuilder;

    use super::*;

    fn draft(title: &str, year: i32, month: u8, day: u32) -> IssueDraft {
        IssueDraft {
            title: title.to_string(),
            description: format!("{title} description"),
            cover_image_url: "https://cdn.example/cover.jpg".into(),
            pdf_url: "https://cdn.example/issue.pdf".into(),
            issue_month: month,
            issue_year: year,
            publish_date: NaiveDate::from_ymd_opt(year, u32::from(month), day).unwrap(),
            featured: false,
        }
    }

    #[tokio::test]
    async fn create_issue_roundtrip() {
        let db = test_db().await;
        let issue = db.create_issue(draft("June 2021", 2021, 6, 1)).await.unwrap();

        assert!(issue.id.starts_with("iss-"));
        assert_eq!(issue.issue_month, 6);
        assert_eq!(issue.issue_year, 2021);

        let fetched = db.get_issue(&issue.id).await.unwrap().unwrap();
        assert_eq!(fetched, issue);
    }

    #[tokio::test]
    async fn create_issue_rejects_bad_month() {
        let db = test_db().await;
        let mut bad = draft("Bad", 2021, 6, 1);
        bad.issue_month = 13;
        let result = db.create_issue(bad).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn get_missing_issue_is_none() {
        let db = test_db().await;
        assert!(db.get_issue("iss-missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_orders_year_then_month_descending() {
        let db = test_db().await;
        db.create_issue(draft("Jan 2020", 2020, 1, 1)).await.unwrap();
        db.create_issue(draft("Jun 2021", 2021, 6, 1)).await.unwrap();
        db.create_issue(draft("Jan 2021", 2021, 1, 1)).await.unwrap();

        let issues = db.list_issues().await.unwrap();
        let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Jun 2021", "Jan 2021", "Jan 2020"]);
    }

    #[tokio::test]
    async fn publish_date_listing_is_newest_first() {
        let db = test_db().await;
        db.create_issue(draft("Middle", 2021, 3, 15)).await.unwrap();
        db.create_issue(draft("Newest", 2021, 12, 1)).await.unwrap();
        db.create_issue(draft("Oldest", 2020, 7, 1)).await.unwrap();

        let issues = db.list_issues_by_publish_date().await.unwrap();
        let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn latest_and_featured() {
        let db = test_db().await;
        assert!(db.latest_issue().await.unwrap().is_none());

        db.create_issue(draft("Old", 2020, 1, 1)).await.unwrap();
        let mut featured = draft("New", 2021, 6, 1);
        featured.featured = true;
        db.create_issue(featured).await.unwrap();

        let latest = db.latest_issue().await.unwrap().unwrap();
        assert_eq!(latest.title, "New");

        let promoted = db.featured_issues(4).await.unwrap();
        assert_eq!(promoted.len(), 1);
        assert_eq!(promoted[0].title, "New");
    }

    #[tokio::test]
    async fn featured_respects_limit() {
        let db = test_db().await;
        for month in 1..=6u8 {
            let mut d = draft(&format!("M{month}"), 2021, month, 1);
            d.featured = true;
            db.create_issue(d).await.unwrap();
        }
        assert_eq!(db.featured_issues(4).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn adjacency_over_three_dates() {
        let db = test_db().await;
        let d1 = db.create_issue(draft("First", 2021, 1, 1)).await.unwrap();
        let d2 = db.create_issue(draft("Middle", 2021, 6, 1)).await.unwrap();
        let d3 = db.create_issue(draft("Last", 2021, 12, 1)).await.unwrap();

        let prev = db.previous_issue(d2.publish_date).await.unwrap().unwrap();
        let next = db.next_issue(d2.publish_date).await.unwrap().unwrap();
        assert_eq!(prev.id, d1.id);
        assert_eq!(next.id, d3.id);

        assert!(db.previous_issue(d1.publish_date).await.unwrap().is_none());
        assert!(db.next_issue(d3.publish_date).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_issue_partial() {
        let db = test_db().await;
        let issue = db.create_issue(draft("Original", 2021, 6, 1)).await.unwrap();

        let update = IssueUpdateBuilder::new()
            .title("Renamed")
            .featured(true)
            .build();
        let updated = db.update_issue(&issue.id, update).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert!(updated.featured);
        assert_eq!(updated.issue_year, 2021);
        assert!(updated.updated_at >= issue.updated_at);
    }

    #[tokio::test]
    async fn update_rejects_bad_month() {
        let db = test_db().await;
        let issue = db.create_issue(draft("Original", 2021, 6, 1)).await.unwrap();

        let update = IssueUpdateBuilder::new().issue_month(0).build();
        let result = db.update_issue(&issue.id, update).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn update_missing_issue_is_no_result() {
        let db = test_db().await;
        let update = IssueUpdateBuilder::new().title("Ghost").build();
        let result = db.update_issue("iss-missing", update).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn delete_issue_then_get_is_none() {
        let db = test_db().await;
        let issue = db.create_issue(draft("Doomed", 2021, 6, 1)).await.unwrap();
        db.delete_issue(&issue.id).await.unwrap();
        assert!(db.get_issue(&issue.id).await.unwrap().is_none());
    }
}
