//! Correlation headers: request ids, caller ids and W3C trace context.

use std::fmt;

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{
    HeaderMap, HeaderName,
    header::{HeaderValue, InvalidHeaderValue},
};
use uuid::Uuid;

use crate::identity::USER_ID_HEADER;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller supplied request id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlates a request across logs, spans and the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    /// Reuse the caller's id when it is usable, otherwise mint a v7 uuid.
    pub(super) fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
            .map_or_else(
                || Self(Uuid::now_v7().to_string()),
                |value| Self(value.to_owned()),
            )
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    pub(super) fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller id as sent by the gateway, for logging only; validation happens in
/// the identity middleware.
pub(super) fn caller(headers: &HeaderMap) -> &str {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or("anonymous", str::trim)
}

/// Parent span context propagated by the caller, when it is valid.
pub(super) fn parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so a request without trace headers
        // does not join whatever span happens to be current.
        let context = propagator.extract_with_context(&Context::new(), &Headers(headers));

        context
            .span()
            .span_context()
            .is_valid()
            .then_some(context)
    })
}

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
