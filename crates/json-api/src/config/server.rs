//! Server Config

use std::time::Duration;

use clap::Args;

/// Listener and shutdown settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Seconds in-flight requests may take to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECONDS", default_value_t = 30)]
    pub shutdown_timeout_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Grace period for draining requests on shutdown.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}
