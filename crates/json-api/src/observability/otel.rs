//! OTLP trace export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::{ServerConfig, observability::ObservabilityConfig};

use super::ObservabilityError;

const SERVICE_NAMESPACE: &str = "roomkeeper";

pub(super) fn build_tracer_provider(
    config: &ServerConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let observability = &config.observability;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(observability.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            observability.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(observability.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ServerConfig) -> Resource {
    let ObservabilityConfig {
        otel_service_name,
        otel_service_version,
        otel_deployment_environment,
        ..
    } = &config.observability;

    Resource::builder_empty()
        .with_service_name(otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", SERVICE_NAMESPACE),
            KeyValue::new("service.version", otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                otel_deployment_environment.clone(),
            ),
            KeyValue::new("hotel.time_zone", config.hotel.time_zone.clone()),
        ])
        .build()
}

/// Follow the caller's sampling decision, otherwise sample by ratio.
fn sampler(ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(sample_ratio(ratio))))
}

fn sample_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 1.0;
    }

    ratio.clamp(0.0, 1.0)
}
