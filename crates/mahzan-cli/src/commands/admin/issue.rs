use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

use mahzan_db::repos::issue::IssueDraft;
use mahzan_db::updates::issue::IssueUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminIssueCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse {
    deleted: String,
}

pub async fn handle(
    action: &AdminIssueCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AdminIssueCommands::Create {
            title,
            description,
            cover_image_url,
            pdf_url,
            month,
            year,
            publish_date,
            featured,
        } => {
            let draft = IssueDraft {
                title: title.clone(),
                description: description.clone(),
                cover_image_url: cover_image_url.clone(),
                pdf_url: pdf_url.clone(),
                issue_month: *month,
                issue_year: *year,
                publish_date: parse_publish_date(publish_date)?,
                featured: *featured,
            };
            let issue = ctx
                .store
                .create_issue(draft)
                .await
                .context("failed to create issue")?;
            output(&issue, flags.format)
        }
        AdminIssueCommands::Update {
            id,
            title,
            description,
            cover_image_url,
            pdf_url,
            month,
            year,
            publish_date,
            featured,
        } => {
            let mut builder = IssueUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            if let Some(url) = cover_image_url {
                builder = builder.cover_image_url(url);
            }
            if let Some(url) = pdf_url {
                builder = builder.pdf_url(url);
            }
            if let Some(month) = month {
                builder = builder.issue_month(*month);
            }
            if let Some(year) = year {
                builder = builder.issue_year(*year);
            }
            if let Some(date) = publish_date {
                builder = builder.publish_date(parse_publish_date(date)?);
            }
            if let Some(featured) = featured {
                builder = builder.featured(*featured);
            }

            let issue = ctx
                .store
                .update_issue(id, builder.build())
                .await
                .with_context(|| format!("failed to update issue {id}"))?;
            output(&issue, flags.format)
        }
        AdminIssueCommands::List { limit } => {
            let mut issues = ctx.store.list_issues_by_publish_date().await?;
            let limit = limit
                .or(flags.limit)
                .unwrap_or(ctx.config.general.default_limit);
            issues.truncate(usize::try_from(limit)?);
            output(&issues, flags.format)
        }
        AdminIssueCommands::Get { id } => {
            let issue = ctx
                .store
                .get_issue(id)
                .await?
                .with_context(|| format!("no issue with id {id}"))?;
            output(&issue, flags.format)
        }
        AdminIssueCommands::Delete { id } => {
            ctx.store
                .delete_issue(id)
                .await
                .with_context(|| format!("failed to delete issue {id}"))?;
            output(
                &DeleteResponse {
                    deleted: id.clone(),
                },
                flags.format,
            )
        }
    }
}

fn parse_publish_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid publish date {value:?} (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::global::OutputFormat;

    fn quiet_flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: true,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn update_failure_names_the_operation() {
        let mut ctx = AppContext::in_memory().await;
        let action = AdminIssueCommands::Update {
            id: "iss-missing".to_string(),
            title: Some("Renamed".to_string()),
            description: None,
            cover_image_url: None,
            pdf_url: None,
            month: None,
            year: None,
            publish_date: None,
            featured: None,
        };

        let error = handle(&action, &mut ctx, &quiet_flags())
            .await
            .expect_err("updating a missing issue should fail");
        assert!(format!("{error:#}").contains("failed to update issue iss-missing"));
    }

    #[tokio::test]
    async fn delete_reports_the_issue_id() {
        let mut ctx = AppContext::in_memory().await;
        let action = AdminIssueCommands::Create {
            title: "June 2021".to_string(),
            description: "Summer double issue".to_string(),
            cover_image_url: "https://img.example/june.jpg".to_string(),
            pdf_url: "https://pdf.example/june.pdf".to_string(),
            month: 6,
            year: 2021,
            publish_date: "2021-06-01".to_string(),
            featured: false,
        };
        handle(&action, &mut ctx, &quiet_flags())
            .await
            .expect("create");

        let issues = ctx.store.list_issues_by_publish_date().await.expect("list");
        let delete = AdminIssueCommands::Delete {
            id: issues[0].id.clone(),
        };
        handle(&delete, &mut ctx, &quiet_flags()).await.expect("delete");
        assert!(ctx.store.get_issue(&issues[0].id).await.expect("get").is_none());
    }
}
