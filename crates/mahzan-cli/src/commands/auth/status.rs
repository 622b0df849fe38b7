use serde::Serialize;

use mahzan_auth::{HttpIdentityProvider, SessionState, token_store};

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    email: Option<String>,
    is_admin: bool,
    token_source: Option<String>,
    note: Option<String>,
}

pub async fn handle(
    flags: &GlobalFlags,
    config: &mahzan_config::MahzanConfig,
) -> anyhow::Result<()> {
    let stored = mahzan_auth::resolve_token();

    let status = if !config.provider.is_configured() {
        AuthStatusResponse {
            authenticated: false,
            email: None,
            is_admin: false,
            token_source: None,
            note: Some("MAHZAN_PROVIDER__URL not configured".into()),
        }
    } else if stored.is_none() {
        AuthStatusResponse {
            authenticated: false,
            email: None,
            is_admin: false,
            token_source: None,
            note: Some("no stored token. Run `mhz auth login`.".into()),
        }
    } else {
        let provider = HttpIdentityProvider::new(&config.provider.url, &config.provider.anon_key);
        let mut session = SessionState::init(provider, stored);
        match session.refresh().await {
            Ok(()) => {
                let snapshot = session.snapshot();
                let authenticated = snapshot.is_authenticated();
                AuthStatusResponse {
                    authenticated,
                    email: snapshot.user.map(|user| user.email),
                    is_admin: snapshot.is_admin,
                    token_source: current_source_label(),
                    note: snapshot_note(authenticated, snapshot.is_admin),
                }
            }
            Err(error) => AuthStatusResponse {
                authenticated: false,
                email: None,
                is_admin: false,
                token_source: current_source_label(),
                note: Some(error.to_string()),
            },
        }
    };

    output(&status, flags.format)
}

fn current_source_label() -> Option<String> {
    token_store::current_source().map(|source| source.as_str().to_string())
}

fn snapshot_note(authenticated: bool, is_admin: bool) -> Option<String> {
    if authenticated && !is_admin {
        Some("signed in without the admin role".into())
    } else if authenticated {
        None
    } else {
        Some("stored token is no longer valid. Run `mhz auth login`.".into())
    }
}
