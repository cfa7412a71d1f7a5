use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Rules(args) => commands::rules::handle(&args, ctx, flags).await,
        Commands::Show(args) => commands::show::handle(&args, ctx, flags).await,
        Commands::Browse(args) => commands::browse::handle(&args, ctx, flags).await,
        Commands::Policies(args) => commands::policies::handle(&args, ctx, flags).await,
        Commands::Ask(args) => commands::ask::handle(&args, ctx, flags),
        Commands::Config => commands::config::handle(&ctx.config, flags),
    }
}
