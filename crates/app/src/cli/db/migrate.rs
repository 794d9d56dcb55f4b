use clap::Args;
use roomkeeper_app::database;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}
