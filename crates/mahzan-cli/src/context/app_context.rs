use std::path::PathBuf;

use anyhow::Context;
use mahzan_auth::{HttpIdentityProvider, SessionState};
use mahzan_config::MahzanConfig;
use mahzan_core::identity::SessionSnapshot;
use mahzan_db::ArchiveDb;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub store: ArchiveDb,
    pub config: MahzanConfig,
    session: SessionState<HttpIdentityProvider>,
    session_resolved: bool,
}

impl AppContext {
    /// Open the archive store and prime the session from any stored token.
    ///
    /// The stored token is not validated here; the first call to
    /// [`Self::session_snapshot`] resolves it against the provider.
    pub async fn init(config: MahzanConfig) -> anyhow::Result<Self> {
        let store = open_store(&config).await?;

        let provider =
            HttpIdentityProvider::new(&config.provider.url, &config.provider.anon_key);
        let session = SessionState::init(provider, mahzan_auth::resolve_token());

        Ok(Self {
            store,
            config,
            session,
            session_resolved: false,
        })
    }

    /// Resolve and cache the current identity and role.
    ///
    /// Read-only commands never call this, so they stay usable offline and
    /// without a provider configured.
    pub async fn session_snapshot(&mut self) -> SessionSnapshot {
        if !self.session_resolved {
            if self.config.provider.is_configured() {
                if let Err(error) = self.session.refresh().await {
                    tracing::warn!(%error, "session refresh failed; continuing anonymously");
                    self.session.teardown();
                }
            } else {
                self.session.teardown();
            }
            self.session_resolved = true;
        }
        self.session.snapshot()
    }
}

#[cfg(test)]
impl AppContext {
    /// Context over an in-memory store with an already-resolved anonymous
    /// session, for command handler tests.
    pub(crate) async fn in_memory() -> Self {
        let config = MahzanConfig::default();
        let store = ArchiveDb::open_local(":memory:")
            .await
            .expect("in-memory store");
        let provider =
            HttpIdentityProvider::new(&config.provider.url, &config.provider.anon_key);

        Self {
            store,
            config,
            session: SessionState::init(provider, None),
            session_resolved: true,
        }
    }
}

/// Open a synced replica when the gateway is configured, otherwise a plain
/// local store. A sync failure at startup degrades to local with a warning.
async fn open_store(config: &MahzanConfig) -> anyhow::Result<ArchiveDb> {
    let local_path = local_store_path(config)?;
    let local_path_str = local_path.to_string_lossy();

    if config.gateway.is_configured() {
        match ArchiveDb::open_synced(
            &local_path_str,
            &config.gateway.url,
            &config.gateway.auth_token,
            config.gateway.sync_interval_secs,
        )
        .await
        {
            Ok(store) => return Ok(store),
            Err(error) => {
                tracing::warn!(
                    %error,
                    "failed to open synced archive store; falling back to local"
                );
            }
        }
    }

    ArchiveDb::open_local(&local_path_str)
        .await
        .context("failed to open local archive store")
}

fn local_store_path(config: &MahzanConfig) -> anyhow::Result<PathBuf> {
    if config.gateway.has_local_replica() {
        return Ok(PathBuf::from(&config.gateway.local_replica_path));
    }

    let home = dirs::home_dir().context("could not determine home directory")?;
    let data_dir = home.join(".mahzan");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    Ok(data_dir.join("archive.db"))
}
