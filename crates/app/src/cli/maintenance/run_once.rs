use clap::Args;
use jiff::{Timestamp, tz::TimeZone};
use roomkeeper_app::{
    database::{self, Db},
    domain::maintenance::{MaintenanceService, PgMaintenanceService},
};

#[derive(Debug, Args)]
pub(crate) struct RunOnceArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// IANA time zone that decides the hotel's current date
    #[arg(long, env = "HOTEL_TIME_ZONE", default_value = "UTC")]
    time_zone: String,
}

pub(crate) async fn run(args: RunOnceArgs) -> Result<(), String> {
    let time_zone = TimeZone::get(&args.time_zone)
        .map_err(|error| format!("unknown time zone `{}`: {error}", args.time_zone))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgMaintenanceService::new(Db::new(pool));

    let now = Timestamp::now();
    let today = now.to_zoned(time_zone).date();
    let report = service.run_tick(now, today).await;

    println!("refunds_completed: {}", report.refunds_completed);
    println!("bookings_completed: {}", report.bookings_completed);
    println!("otps_purged: {}", report.otps_purged);

    if !report.is_clean() {
        let failed: Vec<&str> = report.failed.iter().map(|sweep| sweep.as_str()).collect();

        return Err(format!("failed sweeps: {}", failed.join(", ")));
    }

    Ok(())
}
