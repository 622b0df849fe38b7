use std::io::{BufRead, Write as _};

use mahzan_core::entities::Issue;
use mahzan_core::filter::{ArchiveViewState, available_years};
use mahzan_core::month::month_name;
use mahzan_core::nav::{NavOutcome, Navigator, View};
use mahzan_core::paginate::{PageItem, clamp_page, page_window, paginate, total_pages};

use crate::cli::GlobalFlags;
use crate::context::AppContext;

/// One parsed shell input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Go(View, Option<String>),
    Search(String),
    Year(Option<i32>),
    Month(Option<u8>),
    Page(usize),
    NextPage,
    PrevPage,
    ClearFilters,
    Help,
    Quit,
}

/// Handle `mhz browse`: a line-oriented shell over the view set.
///
/// Entering a view clears the screen and redraws from the top; a denied
/// transition leaves the current screen in place and prints the reason.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut navigator = Navigator::new();
    let mut archive = ArchiveViewState::new();

    render_view(View::Home, &navigator, &archive, ctx).await?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("mahzan> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => print_help(),
            BrowseCommand::Go(view, issue_id) => {
                let session = ctx.session_snapshot().await;
                match navigator.navigate(view, issue_id, &session) {
                    NavOutcome::Entered(entered) => {
                        clear_screen(flags);
                        render_view(entered, &navigator, &archive, ctx).await?;
                    }
                    NavOutcome::Denied(reason) => println!("{reason}"),
                }
            }
            BrowseCommand::Search(query) => {
                archive.set_query(query);
                render_archive(&archive, ctx).await?;
            }
            BrowseCommand::Year(year) => {
                archive.set_year(year);
                render_archive(&archive, ctx).await?;
            }
            BrowseCommand::Month(month) => {
                archive.set_month(month);
                render_archive(&archive, ctx).await?;
            }
            BrowseCommand::Page(page) => {
                archive.set_page(page);
                render_archive(&archive, ctx).await?;
            }
            BrowseCommand::NextPage => {
                archive.set_page(archive.page() + 1);
                render_archive(&archive, ctx).await?;
            }
            BrowseCommand::PrevPage => {
                archive.set_page(archive.page().saturating_sub(1));
                render_archive(&archive, ctx).await?;
            }
            BrowseCommand::ClearFilters => {
                archive.clear_filters();
                render_archive(&archive, ctx).await?;
            }
        }
    }

    Ok(())
}

fn parse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let rest = parts.collect::<Vec<_>>();

    let command = match word {
        "home" => BrowseCommand::Go(View::Home, None),
        "archive" => BrowseCommand::Go(View::Archive, None),
        "issue" => BrowseCommand::Go(View::IssueDetail, rest.first().map(ToString::to_string)),
        "admin" => BrowseCommand::Go(View::Admin, None),
        "login" => BrowseCommand::Go(View::Login, None),
        "setup" => BrowseCommand::Go(View::Setup, None),
        "search" => BrowseCommand::Search(rest.join(" ")),
        "year" => match rest.first() {
            None | Some(&"clear") => BrowseCommand::Year(None),
            Some(value) => BrowseCommand::Year(Some(
                value.parse().map_err(|_| format!("not a year: {value}"))?,
            )),
        },
        "month" => match rest.first() {
            None | Some(&"clear") => BrowseCommand::Month(None),
            Some(value) => BrowseCommand::Month(Some(
                value.parse().map_err(|_| format!("not a month: {value}"))?,
            )),
        },
        "page" => {
            let value = rest.first().ok_or("usage: page <n>")?;
            BrowseCommand::Page(value.parse().map_err(|_| format!("not a page: {value}"))?)
        }
        "next" => BrowseCommand::NextPage,
        "prev" => BrowseCommand::PrevPage,
        "clear" => BrowseCommand::ClearFilters,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

fn print_help() {
    println!("views:    home, archive, issue [id], admin, login, setup");
    println!("archive:  search <text>, year <y|clear>, month <m|clear>, page <n>, next, prev, clear");
    println!("shell:    help, quit");
}

fn clear_screen(flags: &GlobalFlags) {
    if !flags.quiet {
        print!("\u{1b}[2J\u{1b}[H");
    }
}

async fn render_view(
    view: View,
    navigator: &Navigator,
    archive: &ArchiveViewState,
    ctx: &mut AppContext,
) -> anyhow::Result<()> {
    match view {
        View::Home => render_home(ctx).await,
        View::Archive => render_archive(archive, ctx).await,
        View::IssueDetail => render_issue(navigator.issue_id(), ctx).await,
        View::Admin => {
            println!("== Admin ==");
            println!("Manage content with `mhz admin issue ...` and `mhz admin affiliate ...`.");
            Ok(())
        }
        View::Login => {
            println!("== Login ==");
            println!("Sign in with `mhz auth login --email you@example.com`.");
            Ok(())
        }
        View::Setup => {
            println!("== Setup ==");
            println!("Run `mhz setup` for first-run instructions.");
            Ok(())
        }
    }
}

async fn render_home(ctx: &mut AppContext) -> anyhow::Result<()> {
    let featured_limit = ctx.config.general.featured_limit;
    let (latest, featured, affiliates) = tokio::join!(
        ctx.store.latest_issue(),
        ctx.store.featured_issues(featured_limit),
        ctx.store.active_affiliates(),
    );

    println!("== Home ==");
    match latest.unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to load latest issue");
        None
    }) {
        Some(issue) => println!("Latest: {} ({})", issue.title, issue_label(&issue)),
        None => println!("Latest: (none yet)"),
    }

    let featured = featured.unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to load featured issues");
        Vec::new()
    });
    if !featured.is_empty() {
        println!("Featured:");
        for issue in &featured {
            println!("  {} — {}", issue.id, issue.title);
        }
    }

    let affiliates = affiliates.unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to load affiliate publications");
        Vec::new()
    });
    if !affiliates.is_empty() {
        println!("Partner publications:");
        for affiliate in &affiliates {
            println!("  {}", affiliate.name);
        }
    }
    Ok(())
}

async fn render_archive(archive: &ArchiveViewState, ctx: &mut AppContext) -> anyhow::Result<()> {
    let issues = ctx.store.list_issues().await?;
    let matches = archive.filter().apply(&issues);
    let page = clamp_page(archive.page(), matches.len());
    let total = total_pages(matches.len());

    println!("== Archive ==");
    if archive.filter().is_active() {
        println!(
            "({} of {} issues match; years: {:?})",
            matches.len(),
            issues.len(),
            available_years(&issues),
        );
    }
    for issue in paginate(&matches, page) {
        println!("  {} — {} ({})", issue.id, issue.title, issue_label(issue));
    }
    if matches.is_empty() {
        println!("  (no issues match)");
    }

    let pager = page_window(page, total)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(n) if n == page => format!("[{n}]"),
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("page {pager}");
    Ok(())
}

async fn render_issue(issue_id: Option<&str>, ctx: &mut AppContext) -> anyhow::Result<()> {
    let Some(id) = issue_id else {
        println!("No issue selected. Use `issue <id>`.");
        return Ok(());
    };
    let Some(issue) = ctx.store.get_issue(id).await? else {
        println!("Issue not found. Use `archive` to browse.");
        return Ok(());
    };

    println!("== {} ==", issue.title);
    println!("{}", issue_label(&issue));
    println!("{}", issue.description);
    println!("pdf: {}", issue.pdf_url);

    if let Some(previous) = ctx.store.previous_issue(issue.publish_date).await? {
        println!("previous: {} — {}", previous.id, previous.title);
    }
    if let Some(next) = ctx.store.next_issue(issue.publish_date).await? {
        println!("next: {} — {}", next.id, next.title);
    }
    Ok(())
}

fn issue_label(issue: &Issue) -> String {
    month_name(issue.issue_month).map_or_else(
        || format!("{}/{}", issue.issue_month, issue.issue_year),
        |name| format!("{name} {}", issue.issue_year),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_view_commands() {
        assert_eq!(
            parse_command("home").unwrap(),
            Some(BrowseCommand::Go(View::Home, None)),
        );
        assert_eq!(
            parse_command("issue iss-42").unwrap(),
            Some(BrowseCommand::Go(
                View::IssueDetail,
                Some("iss-42".to_string()),
            )),
        );
        // Detail view without an id falls back to the last viewed issue.
        assert_eq!(
            parse_command("issue").unwrap(),
            Some(BrowseCommand::Go(View::IssueDetail, None)),
        );
    }

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            parse_command("search deep harvest").unwrap(),
            Some(BrowseCommand::Search("deep harvest".to_string())),
        );
        assert_eq!(
            parse_command("year 2021").unwrap(),
            Some(BrowseCommand::Year(Some(2021))),
        );
        assert_eq!(
            parse_command("year clear").unwrap(),
            Some(BrowseCommand::Year(None)),
        );
        assert_eq!(
            parse_command("month 9").unwrap(),
            Some(BrowseCommand::Month(Some(9))),
        );
    }

    #[test]
    fn rejects_garbage_with_a_message() {
        assert!(parse_command("teleport").is_err());
        assert!(parse_command("year soon").is_err());
        assert!(parse_command("page last").is_err());
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }
}
