//! Maintenance Config

use std::time::Duration;

use clap::Args;

/// Background maintenance settings.
#[derive(Debug, Args)]
pub struct MaintenanceConfig {
    /// Run the maintenance scheduler inside the server process
    #[arg(long, env = "MAINTENANCE_ENABLED", default_value_t = true)]
    pub maintenance_enabled: bool,

    /// Seconds between maintenance ticks
    #[arg(
        long,
        env = "MAINTENANCE_INTERVAL_SECONDS",
        default_value_t = 60_u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub maintenance_interval_seconds: u64,
}

impl MaintenanceConfig {
    /// Period between maintenance ticks.
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval_seconds)
    }
}
