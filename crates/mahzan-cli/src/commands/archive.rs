use serde::Serialize;

use mahzan_core::entities::Issue;
use mahzan_core::filter::{IssueFilter, available_years};
use mahzan_core::paginate::{PageItem, clamp_page, page_window, paginate, total_pages};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ArchiveArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ArchivePage {
    issues: Vec<Issue>,
    page: usize,
    total_pages: usize,
    total_matches: usize,
    years: Vec<i32>,
    pager: String,
}

/// Handle `mhz archive`.
pub async fn handle(
    args: &ArchiveArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let issues = ctx.store.list_issues().await?;
    let page = build_page(&issues, args);
    output(&page, flags.format)
}

fn build_page(issues: &[Issue], args: &ArchiveArgs) -> ArchivePage {
    let filter = IssueFilter {
        query: args.search.clone().unwrap_or_default(),
        year: args.year,
        month: args.month,
    };

    let years = available_years(issues);
    let matches = filter.apply(issues);

    let page = clamp_page(args.page, matches.len());
    let visible = paginate(&matches, page)
        .iter()
        .map(|issue| (*issue).clone())
        .collect::<Vec<_>>();

    ArchivePage {
        issues: visible,
        page,
        total_pages: total_pages(matches.len()),
        total_matches: matches.len(),
        years,
        pager: render_pager(page, total_pages(matches.len())),
    }
}

/// Render the page window as a single line, e.g. `1 … 4 [5] 6 … 9`.
fn render_pager(current: usize, total: usize) -> String {
    page_window(current, total)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == current => format!("[{page}]"),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    use mahzan_core::entities::Issue;
    use mahzan_core::paginate::PAGE_SIZE;

    use super::*;

    fn issue(id: &str, title: &str, year: i32, month: u8) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            cover_image_url: String::new(),
            pdf_url: String::new(),
            issue_month: month,
            issue_year: year,
            publish_date: NaiveDate::from_ymd_opt(year, u32::from(month), 1).unwrap(),
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn many_issues(count: usize) -> Vec<Issue> {
        (0..count)
            .map(|n| issue(&format!("iss-{n}"), &format!("Issue {n}"), 2024, 1))
            .collect()
    }

    fn args(search: Option<&str>, year: Option<i32>, month: Option<u8>, page: usize) -> ArchiveArgs {
        ArchiveArgs {
            search: search.map(str::to_string),
            year,
            month,
            page,
        }
    }

    #[test]
    fn first_page_holds_twelve_issues() {
        let issues = many_issues(25);
        let page = build_page(&issues, &args(None, None, None, 1));

        assert_eq!(page.issues.len(), PAGE_SIZE);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_matches, 25);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let issues = many_issues(25);
        let page = build_page(&issues, &args(None, None, None, 99));

        assert_eq!(page.page, 3);
        assert_eq!(page.issues.len(), 1);
    }

    #[test]
    fn filters_combine_with_and_semantics() {
        let issues = vec![
            issue("iss-1", "Harvest Special", 2021, 9),
            issue("iss-2", "Harvest Recap", 2022, 9),
            issue("iss-3", "Design Annual", 2021, 9),
        ];
        let page = build_page(&issues, &args(Some("harvest"), Some(2021), None, 1));

        assert_eq!(page.total_matches, 1);
        assert_eq!(page.issues[0].id, "iss-1");
    }

    #[test]
    fn pager_marks_current_page() {
        let issues = many_issues(25);
        let page = build_page(&issues, &args(None, None, None, 2));

        assert_eq!(page.pager, "1 [2] 3");
    }
}
