use serde::Serialize;

use mahzan_core::entities::{AffiliatePublication, Issue};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct HomeView {
    latest_issue: Option<Issue>,
    featured_issues: Vec<Issue>,
    affiliates: Vec<AffiliatePublication>,
}

/// Handle `mhz home`.
///
/// The three sections load concurrently and fail independently: a section
/// whose query errors renders empty instead of taking down the page.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let featured_limit = ctx.config.general.featured_limit;

    let (latest, featured, affiliates) = tokio::join!(
        ctx.store.latest_issue(),
        ctx.store.featured_issues(featured_limit),
        ctx.store.active_affiliates(),
    );

    let latest_issue = latest.unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to load latest issue");
        None
    });
    let featured_issues = featured.unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to load featured issues");
        Vec::new()
    });
    let affiliates = affiliates.unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to load affiliate publications");
        Vec::new()
    });

    output(
        &HomeView {
            latest_issue,
            featured_issues,
            affiliates,
        },
        flags.format,
    )
}
