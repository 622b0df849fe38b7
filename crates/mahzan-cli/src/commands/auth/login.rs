use anyhow::{Context, bail};
use serde::Serialize;

use mahzan_auth::{HttpIdentityProvider, SessionState, token_store};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    signed_in: bool,
    email: String,
    is_admin: bool,
}

pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    config: &mahzan_config::MahzanConfig,
) -> anyhow::Result<()> {
    if !config.provider.is_configured() {
        bail!(
            "identity provider not configured. Set MAHZAN_PROVIDER__URL and MAHZAN_PROVIDER__ANON_KEY (see `mhz setup`)."
        );
    }

    let password = match &args.password {
        Some(password) => password.clone(),
        None => std::env::var("MAHZAN_PASSWORD")
            .context("no password given. Pass --password or set MAHZAN_PASSWORD.")?,
    };

    let provider = HttpIdentityProvider::new(&config.provider.url, &config.provider.anon_key);
    let mut session = SessionState::init(provider, None);
    let token = session.sign_in(&args.email, &password).await?;

    token_store::store(&token)?;

    let snapshot = session.snapshot();
    output(
        &AuthLoginResponse {
            signed_in: true,
            email: args.email.clone(),
            is_admin: snapshot.is_admin,
        },
        flags.format,
    )
}
