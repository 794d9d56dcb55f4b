//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    hotel::HotelConfig,
    maintenance::MaintenanceConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    smtp::SmtpConfig,
};

pub(crate) mod db;
pub(crate) mod hotel;
pub(crate) mod maintenance;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod smtp;

/// Roomkeeper JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "roomkeeper-json", about = "Roomkeeper JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Property settings.
    #[command(flatten)]
    pub hotel: HotelConfig,

    /// Background maintenance settings.
    #[command(flatten)]
    pub maintenance: MaintenanceConfig,

    /// Invoice delivery settings.
    #[command(flatten)]
    pub smtp: SmtpConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_defaults_parse_with_only_database_url() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "roomkeeper-json",
            "--database-url",
            "postgres://localhost/roomkeeper",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.shutdown_timeout().as_secs(), 30);
        assert_eq!(config.hotel.time_zone, "UTC");
        assert!(config.maintenance.maintenance_enabled, "maintenance is on by default");
        assert_eq!(config.maintenance.maintenance_interval_seconds, 60);
        assert!(config.smtp.settings().is_none(), "smtp is optional");

        Ok(())
    }
}
