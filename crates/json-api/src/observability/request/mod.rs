//! Request logging middleware: one span per request, completion logs and
//! HTTP metrics.

mod headers;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use self::headers::{REQUEST_ID_HEADER, RequestId};
use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Paths polled by health checks and scrapers, left out of logs and metrics.
const UNTRACED_PATHS: &[&str] = &["/metrics", "/healthcheck"];

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let request_id = RequestId::from_headers(req.headers());

    match request_id.header_value() {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(%request_id, "request id is not a valid header value: {source}"),
    }

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.as_str().to_owned());

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = spans::route_template(&path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %format!("{method} {route}"),
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        caller = %headers::caller(req.headers()),
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::current().parent_propagation
        && let Some(parent) = headers::parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(&method, &route, status.as_u16(), elapsed.as_secs_f64());

    log_completion(&span, status, elapsed);
}

fn log_completion(span: &Span, status: StatusCode, elapsed: Duration) {
    let code = status.as_u16();
    let duration_ms = elapsed.as_millis();
    let threshold = settings::current().slow_request_threshold;

    span.record("status", code);
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = code, duration_ms, "request failed");
        } else if status.is_client_error() {
            warn!(status = code, duration_ms, "request rejected");
        } else {
            info!(status = code, duration_ms, "request completed");
        }

        if elapsed > threshold {
            warn!(
                duration_ms,
                threshold_ms = threshold.as_millis(),
                "slow request"
            );
        }
    });
}
