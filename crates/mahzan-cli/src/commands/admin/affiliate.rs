use anyhow::Context;
use serde::Serialize;

use mahzan_db::repos::affiliate::AffiliateDraft;
use mahzan_db::updates::affiliate::AffiliateUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminAffiliateCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse {
    deleted: String,
}

pub async fn handle(
    action: &AdminAffiliateCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AdminAffiliateCommands::Create {
            name,
            logo_url,
            website_url,
            description,
            display_order,
            active,
        } => {
            let draft = AffiliateDraft {
                name: name.clone(),
                logo_url: logo_url.clone(),
                website_url: website_url.clone(),
                description: description.clone(),
                display_order: *display_order,
                active: *active,
            };
            let affiliate = ctx
                .store
                .create_affiliate(draft)
                .await
                .context("failed to create affiliate publication")?;
            output(&affiliate, flags.format)
        }
        AdminAffiliateCommands::Update {
            id,
            name,
            logo_url,
            website_url,
            clear_website_url,
            description,
            display_order,
            active,
        } => {
            let mut builder = AffiliateUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(url) = logo_url {
                builder = builder.logo_url(url);
            }
            if *clear_website_url {
                builder = builder.website_url(None);
            } else if let Some(url) = website_url {
                builder = builder.website_url(Some(url.clone()));
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            if let Some(order) = display_order {
                builder = builder.display_order(*order);
            }
            if let Some(active) = active {
                builder = builder.active(*active);
            }

            let affiliate = ctx
                .store
                .update_affiliate(id, builder.build())
                .await
                .with_context(|| format!("failed to update affiliate publication {id}"))?;
            output(&affiliate, flags.format)
        }
        AdminAffiliateCommands::List => {
            let affiliates = ctx.store.list_affiliates().await?;
            output(&affiliates, flags.format)
        }
        AdminAffiliateCommands::Get { id } => {
            let affiliate = ctx
                .store
                .get_affiliate(id)
                .await?
                .with_context(|| format!("no affiliate publication with id {id}"))?;
            output(&affiliate, flags.format)
        }
        AdminAffiliateCommands::Delete { id } => {
            ctx.store
                .delete_affiliate(id)
                .await
                .with_context(|| format!("failed to delete affiliate publication {id}"))?;
            output(
                &DeleteResponse {
                    deleted: id.clone(),
                },
                flags.format,
            )
        }
    }
}
