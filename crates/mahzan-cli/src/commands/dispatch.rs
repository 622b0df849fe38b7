use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Home => commands::home::handle(ctx, flags).await,
        Commands::Archive(args) => commands::archive::handle(&args, ctx, flags).await,
        Commands::Issue(args) => commands::issue::handle(&args, ctx, flags).await,
        Commands::Browse => commands::browse::handle(ctx, flags).await,
        Commands::Admin { action } => commands::admin::handle(&action, ctx, flags).await,
        Commands::Auth { .. } | Commands::Setup | Commands::Schema(_) => {
            unreachable!("auth/setup/schema are pre-dispatched in main")
        }
    }
}
