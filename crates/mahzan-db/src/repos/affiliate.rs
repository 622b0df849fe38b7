//! Affiliate publication repository: CRUD and display-order listings.

use chrono::Utc;

use mahzan_core::entities::AffiliatePublication;

use crate::ArchiveDb;
use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime};
use crate::updates::affiliate::AffiliateUpdate;

const ID_PREFIX: &str = "aff";

const SELECT_COLS: &str =
    "id, name, logo_url, website_url, description, display_order, active, created_at";

fn row_to_affiliate(row: &libsql::Row) -> Result<AffiliatePublication, DatabaseError> {
    Ok(AffiliatePublication {
        id: row.get(0)?,
        name: row.get(1)?,
        logo_url: row.get(2)?,
        website_url: get_opt_string(row, 3)?,
        description: row.get(4)?,
        display_order: row.get::<i64>(5)?,
        active: get_bool(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

async fn collect_affiliates(
    mut rows: libsql::Rows,
) -> Result<Vec<AffiliatePublication>, DatabaseError> {
    let mut affiliates = Vec::new();
    while let Some(row) = rows.next().await? {
        affiliates.push(row_to_affiliate(&row)?);
    }
    Ok(affiliates)
}

/// New-affiliate payload, mirroring the admin form fields.
#[derive(Debug, Clone)]
pub struct AffiliateDraft {
    pub name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    pub description: String,
    pub display_order: i64,
    pub active: bool,
}

impl ArchiveDb {
    /// Insert a new affiliate publication. The gateway generates the id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_affiliate(
        &self,
        draft: AffiliateDraft,
    ) -> Result<AffiliatePublication, DatabaseError> {
        let now = Utc::now();
        let id = self.generate_id(ID_PREFIX).await?;

        self.conn()
            .execute(
                "INSERT INTO affiliate_publications \
                 (id, name, logo_url, website_url, description, display_order, active, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    draft.name.as_str(),
                    draft.logo_url.as_str(),
                    draft.website_url.as_deref(),
                    draft.description.as_str(),
                    draft.display_order,
                    i64::from(draft.active),
                    now.to_rfc3339(),
                ],
            )
            .await?;

        Ok(AffiliatePublication {
            id,
            name: draft.name,
            logo_url: draft.logo_url,
            website_url: draft.website_url,
            description: draft.description,
            display_order: draft.display_order,
            active: draft.active,
            created_at: now,
        })
    }

    /// Fetch one affiliate by id. `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_affiliate(
        &self,
        id: &str,
    ) -> Result<Option<AffiliatePublication>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM affiliate_publications WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_affiliate(&row)?)),
            None => Ok(None),
        }
    }

    /// All affiliates in display order (admin listing, inactive included).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_affiliates(&self) -> Result<Vec<AffiliatePublication>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM affiliate_publications ORDER BY display_order ASC"
                ),
                (),
            )
            .await?;
        collect_affiliates(rows).await
    }

    /// Active affiliates in display order (public views).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn active_affiliates(&self) -> Result<Vec<AffiliatePublication>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM affiliate_publications \
                     WHERE active = 1 ORDER BY display_order ASC"
                ),
                (),
            )
            .await?;
        collect_affiliates(rows).await
    }

    /// Apply a partial update and return the updated affiliate.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the id does not exist, or
    /// `DatabaseError` if the update fails.
    pub async fn update_affiliate(
        &self,
        affiliate_id: &str,
        update: AffiliateUpdate,
    ) -> Result<AffiliatePublication, DatabaseError> {
        if update.is_empty() {
            return self
                .get_affiliate(affiliate_id)
                .await?
                .ok_or(DatabaseError::NoResult);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref url) = update.logo_url {
            sets.push(format!("logo_url = ?{idx}"));
            params.push(url.clone().into());
            idx += 1;
        }
        if let Some(ref website) = update.website_url {
            sets.push(format!("website_url = ?{idx}"));
            params.push(website.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().into());
            idx += 1;
        }
        if let Some(order) = update.display_order {
            sets.push(format!("display_order = ?{idx}"));
            params.push(order.into());
            idx += 1;
        }
        if let Some(active) = update.active {
            sets.push(format!("active = ?{idx}"));
            params.push(i64::from(active).into());
            idx += 1;
        }

        params.push(affiliate_id.into());
        let sql = format!(
            "UPDATE affiliate_publications SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        tracing::debug!(affiliate_id, %sql, "updating affiliate publication");
        self.conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.get_affiliate(affiliate_id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Delete an affiliate by id. Deleting a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_affiliate(&self, affiliate_id: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "DELETE FROM affiliate_publications WHERE id = ?1",
                [affiliate_id],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::test_db;
    use crate::updates::affiliate::AffiliateUpdateBuilder;

    use super::*;

    fn draft(name: &str, order: i64, active: bool) -> AffiliateDraft {
        AffiliateDraft {
            name: name.to_string(),
            logo_url: "https://cdn.example/logo.png".into(),
            website_url: Some("https://example.com".into()),
            description: format!("{name} description"),
            display_order: order,
            active,
        }
    }

    #[tokio::test]
    async fn create_affiliate_roundtrip() {
        let db = test_db().await;
        let affiliate = db.create_affiliate(draft("Monthly Review", 1, true)).await.unwrap();

        assert!(affiliate.id.starts_with("aff-"));

        let fetched = db.get_affiliate(&affiliate.id).await.unwrap().unwrap();
        assert_eq!(fetched, affiliate);
    }

    #[tokio::test]
    async fn active_listing_hides_inactive_and_sorts_by_order() {
        let db = test_db().await;
        db.create_affiliate(draft("Third", 3, true)).await.unwrap();
        db.create_affiliate(draft("First", 1, true)).await.unwrap();
        db.create_affiliate(draft("Hidden", 2, false)).await.unwrap();

        let active = db.active_affiliates().await.unwrap();
        let names: Vec<&str> = active.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Third"]);

        // Admin listing keeps everything
        assert_eq!(db.list_affiliates().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_affiliate_partial_and_clear_website() {
        let db = test_db().await;
        let affiliate = db.create_affiliate(draft("Original", 1, true)).await.unwrap();

        let update = AffiliateUpdateBuilder::new()
            .name("Renamed")
            .website_url(None)
            .active(false)
            .build();
        let updated = db.update_affiliate(&affiliate.id, update).await.unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.website_url, None);
        assert!(!updated.active);
        assert_eq!(updated.display_order, 1);
    }

    #[tokio::test]
    async fn update_missing_affiliate_is_no_result() {
        let db = test_db().await;
        let update = AffiliateUpdateBuilder::new().name("Ghost").build();
        let result = db.update_affiliate("aff-missing", update).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn delete_affiliate_then_get_is_none() {
        let db = test_db().await;
        let affiliate = db.create_affiliate(draft("Doomed", 1, true)).await.unwrap();
        db.delete_affiliate(&affiliate.id).await.unwrap();
        assert!(db.get_affiliate(&affiliate.id).await.unwrap().is_none());
    }
}
