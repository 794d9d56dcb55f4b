use clap::{Parser, Subcommand};

mod db;
mod maintenance;

#[derive(Debug, Parser)]
#[command(name = "roomkeeper-app", about = "Roomkeeper CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Maintenance(maintenance::MaintenanceCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Maintenance(command) => maintenance::run(command).await,
        }
    }
}
