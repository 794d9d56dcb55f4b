//! Prometheus metrics and the `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const NAMESPACE: &str = "roomkeeper_json";

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

const ROOM_COUNT_BUCKETS: &[f64] = &[0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0];

#[derive(Debug)]
struct ServiceMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    booking_operations_total: IntCounterVec,
    room_search_results: HistogramVec,
}

static SERVICE_METRICS: OnceLock<Option<ServiceMetrics>> = OnceLock::new();

/// Keeps the in-flight gauge raised while a request is being handled.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status_code), status_code_label.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count the outcome of a booking lifecycle operation.
pub(crate) fn observe_booking_operation(operation: &str, outcome: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .booking_operations_total
            .with_label_values(&[operation, outcome])
            .inc();
    }
}

/// Record how many rooms a room search returned.
pub(crate) fn observe_room_search(search: &str, rooms: usize) {
    let Some(metrics) = metrics() else {
        return;
    };

    #[expect(
        clippy::cast_precision_loss,
        reason = "room counts are far below f64 precision limits"
    )]
    let rooms = rooms as f64;

    metrics
        .room_search_results
        .with_label_values(&[search])
        .observe(rooms);
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static ServiceMetrics> {
    SERVICE_METRICS.get_or_init(build_metrics).as_ref()
}

/// Register a freshly built collector, logging and discarding it on failure.
fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!("failed to create {name} metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!("failed to register {name} metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<ServiceMetrics> {
    let registry = Registry::new_custom(Some(NAMESPACE.to_owned()), None)
        .inspect_err(|source| error!("failed to create metrics registry: {source}"))
        .ok()?;

    let requests_total = register(
        &registry,
        "http_requests_total",
        IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "HTTP requests partitioned by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "http_request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "http_requests_in_flight",
        IntGauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being handled.",
        )),
    )?;

    let booking_operations_total = register(
        &registry,
        "booking_operations_total",
        IntCounterVec::new(
            Opts::new(
                "booking_operations_total",
                "Booking lifecycle operations partitioned by operation and outcome.",
            ),
            &["operation", "outcome"],
        ),
    )?;

    let room_search_results = register(
        &registry,
        "room_search_results",
        HistogramVec::new(
            HistogramOpts::new(
                "room_search_results",
                "Rooms returned per availability or filter search.",
            )
            .buckets(ROOM_COUNT_BUCKETS.to_vec()),
            &["search"],
        ),
    )?;

    Some(ServiceMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        booking_operations_total,
        room_search_results,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_status_class_buckets_codes() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[tokio::test]
    async fn test_metrics_endpoint_exposes_service_metrics() -> TestResult {
        observe_request("GET", "/booking/list", 200, 0.042);
        observe_request("POST", "/booking/create", 400, 0.011);
        observe_booking_operation("create", "ok");
        observe_room_search("available_rooms", 3);

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        for name in [
            "roomkeeper_json_http_requests_total",
            "roomkeeper_json_http_request_duration_seconds",
            "roomkeeper_json_http_requests_in_flight",
            "roomkeeper_json_booking_operations_total",
            "roomkeeper_json_room_search_results",
        ] {
            assert!(body.contains(name), "expected {name} in exposition");
        }

        assert!(
            body.contains(r#"operation="create",outcome="ok""#),
            "booking outcome labels are exported"
        );

        Ok(())
    }
}
