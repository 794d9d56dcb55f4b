//! Request tracing settings fixed at start-up.

use std::{sync::OnceLock, time::Duration};

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestSettings {
    /// Requests slower than this are logged at warn.
    pub(super) slow_request_threshold: Duration,

    /// Join the caller's trace when it sends W3C trace context.
    pub(super) parent_propagation: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold: Duration::from_secs(1),
            parent_propagation: false,
        }
    }
}

impl RequestSettings {
    fn from_config(config: &ServerConfig) -> Self {
        let observability = &config.observability;

        Self {
            slow_request_threshold: Duration::from_millis(observability.slow_request_threshold_ms),
            // Parent contexts only matter when spans leave the process.
            parent_propagation: observability.otel_enabled
                && observability.otel_parent_propagation_enabled,
        }
    }
}

static SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

/// Fix the settings for the life of the process; later calls are ignored.
pub(super) fn apply_runtime_config(config: &ServerConfig) {
    _ = SETTINGS.set(RequestSettings::from_config(config));
}

pub(super) fn current() -> RequestSettings {
    SETTINGS.get().copied().unwrap_or_default()
}
