use clap::{Args, Subcommand};

mod ensure_app_role;
mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Create or update the runtime role used by the API
    EnsureAppRole(ensure_app_role::EnsureAppRoleArgs),

    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::EnsureAppRole(args) => ensure_app_role::run(args).await,
        DbSubcommand::Migrate(args) => migrate::run(args).await,
    }
}
