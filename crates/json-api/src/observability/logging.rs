//! Tracing subscriber assembly.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies that are chatty at info level.
const QUIET_TARGETS: &[&str] = &["h2", "hyper", "tower", "tonic", "opentelemetry", "sqlx", "lettre"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        let tracer = provider.tracer(config.observability.otel_service_name.clone());

        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(env_filter(&config.logging.log_level))
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

/// `RUST_LOG` wins; otherwise the configured level with noisy targets capped at warn.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}
