use serde::Serialize;

use mahzan_core::entities::Issue;
use mahzan_core::month::month_name;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IssueArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct IssueNeighbor {
    id: String,
    title: String,
}

#[derive(Serialize)]
struct IssueDetail {
    #[serde(flatten)]
    issue: Issue,
    month_label: String,
    previous: Option<IssueNeighbor>,
    next: Option<IssueNeighbor>,
}

/// Handle `mhz issue`.
///
/// An unknown id is a terminal state, not an error exit: readers land here
/// from stale links, so the command prints a pointer back to the archive.
pub async fn handle(
    args: &IssueArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let Some(issue) = ctx.store.get_issue(&args.id).await? else {
        println!("Issue not found. Browse the archive with `mhz archive`.");
        return Ok(());
    };

    // Neighbors are ordered by publish date, independent of archive sorting.
    let previous = ctx.store.previous_issue(issue.publish_date).await?;
    let next = ctx.store.next_issue(issue.publish_date).await?;

    let month_label = month_name(issue.issue_month).map_or_else(
        || issue.issue_month.to_string(),
        |name| format!("{name} {}", issue.issue_year),
    );

    output(
        &IssueDetail {
            month_label,
            previous: previous.map(neighbor),
            next: next.map(neighbor),
            issue,
        },
        flags.format,
    )
}

fn neighbor(issue: Issue) -> IssueNeighbor {
    IssueNeighbor {
        id: issue.id,
        title: issue.title,
    }
}
