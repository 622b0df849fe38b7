use serde::Serialize;

use mahzan_auth::{HttpIdentityProvider, SessionState};

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

/// End the provider session (best effort) and clear stored credentials.
///
/// Local credentials are removed even when the provider cannot be reached.
pub async fn handle(
    flags: &GlobalFlags,
    config: &mahzan_config::MahzanConfig,
) -> anyhow::Result<()> {
    let stored = mahzan_auth::resolve_token();

    if config.provider.is_configured() && stored.is_some() {
        let provider = HttpIdentityProvider::new(&config.provider.url, &config.provider.anon_key);
        let mut session = SessionState::init(provider, stored);
        session.sign_out().await;
    }

    mahzan_auth::forget_token()?;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}
