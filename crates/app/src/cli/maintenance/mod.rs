use clap::{Args, Subcommand};

mod run_once;

#[derive(Debug, Args)]
pub(crate) struct MaintenanceCommand {
    #[command(subcommand)]
    command: MaintenanceSubcommand,
}

#[derive(Debug, Subcommand)]
enum MaintenanceSubcommand {
    /// Run every maintenance sweep once and exit
    RunOnce(run_once::RunOnceArgs),
}

pub(crate) async fn run(command: MaintenanceCommand) -> Result<(), String> {
    match command.command {
        MaintenanceSubcommand::RunOnce(args) => run_once::run(args).await,
    }
}
