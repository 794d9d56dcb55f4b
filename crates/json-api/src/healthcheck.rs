//! Roomkeeper JSON API Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Healthcheck handler
///
/// Returns service health status
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
