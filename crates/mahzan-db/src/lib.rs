//! # mahzan-db
//!
//! libSQL client for the Mahzan remote data gateway.
//!
//! Owns all content state: magazine issues and affiliate publications.
//! Runs against a local database file for development and tests, or a Turso
//! embedded replica synced with the hosted gateway in production.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Mahzan content operations.
///
/// Wraps a libSQL database and connection. Repo methods live in
/// [`repos`] as `impl ArchiveDb` blocks.
pub struct ArchiveDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    synced: bool,
}

impl ArchiveDb {
    /// Open a local-only database at the given path (no cloud sync).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let archive = Self {
            db,
            conn,
            synced: false,
        };
        archive.run_migrations().await?;
        Ok(archive)
    }

    /// Open a Turso embedded replica synced against the hosted gateway.
    ///
    /// Performs an initial sync so reads see current cloud state, then runs
    /// migrations (idempotent on an already-migrated remote).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the replica cannot be built, the initial
    /// sync fails, or migrations fail.
    pub async fn open_synced(
        local_replica_path: &str,
        remote_url: &str,
        auth_token: &str,
        sync_interval_secs: u64,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote_replica(
            local_replica_path,
            remote_url.to_string(),
            auth_token.to_string(),
        )
        .read_your_writes(true)
        .sync_interval(std::time::Duration::from_secs(sync_interval_secs))
        .build()
        .await?;

        db.sync().await?;
        let conn = db.connect()?;

        let archive = Self {
            db,
            conn,
            synced: true,
        };
        archive.run_migrations().await?;
        Ok(archive)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle is backed by a synced Turso replica.
    #[must_use]
    pub const fn is_synced_replica(&self) -> bool {
        self.synced
    }

    /// Push local writes to / pull remote state from the hosted gateway.
    ///
    /// No-op for local-only databases.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the sync fails.
    pub async fn sync(&self) -> Result<(), DatabaseError> {
        if self.synced {
            self.db.sync().await?;
        }
        Ok(())
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"iss-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ArchiveDb;

    /// In-memory database for tests.
    pub async fn test_db() -> ArchiveDb {
        ArchiveDb::open_local(":memory:").await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                (),
            )
            .await
            .unwrap();

        let mut tables = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            tables.push(row.get::<String>(0).unwrap());
        }

        assert!(tables.contains(&"magazine_issues".to_string()));
        assert!(tables.contains(&"affiliate_publications".to_string()));
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generated_ids_carry_prefix_and_are_unique() {
        let db = test_db().await;
        let a = db.generate_id("iss").await.unwrap();
        let b = db.generate_id("iss").await.unwrap();
        assert!(a.starts_with("iss-"));
        assert_eq!(a.len(), "iss-".len() + 8);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn sync_is_noop_for_local() {
        let db = test_db().await;
        assert!(!db.is_synced_replica());
        db.sync().await.unwrap();
    }
}
