mod affiliate;
mod issue;

use anyhow::bail;

use mahzan_core::nav::{NavDecision, View, can_enter};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminCommands;
use crate::context::AppContext;

/// Handle `mhz admin`.
pub async fn handle(
    action: &AdminCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    require_admin(ctx).await?;

    match action {
        AdminCommands::Issue { action } => issue::handle(action, ctx, flags).await,
        AdminCommands::Affiliate { action } => affiliate::handle(action, ctx, flags).await,
    }
}

/// Gate every admin action on the session role.
async fn require_admin(ctx: &mut AppContext) -> anyhow::Result<()> {
    let session = ctx.session_snapshot().await;
    match can_enter(View::Admin, &session) {
        NavDecision::Allow => Ok(()),
        NavDecision::Redirect(_) => {
            bail!("not signed in. Run `mhz auth login --email you@example.com` first.")
        }
        NavDecision::Deny(reason) => bail!("{reason}"),
    }
}
