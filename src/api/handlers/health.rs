//! `GET /health`.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthChecks, HealthResponse, Probe, ProbeStatus, ServiceStatus};
use crate::application::services::ResourceService;
use crate::domain::filter::FilterPredicate;
use crate::state::AppState;

/// Reports whether storage answers a trivial query.
///
/// # Response Codes
///
/// - **200 OK**: storage reachable
/// - **503 Service Unavailable**: storage query failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Connected, 42 users" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = probe_storage(&state).await;

    let (code, status) = if storage.is_ok() {
        (StatusCode::OK, ServiceStatus::Healthy)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ServiceStatus::Degraded)
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { storage },
    };

    (code, Json(body))
}

async fn probe_storage(state: &AppState) -> Probe {
    match state.users.count(&FilterPredicate::default()).await {
        Ok(count) => Probe {
            status: ProbeStatus::Ok,
            message: format!("Connected, {count} users"),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            Probe {
                status: ProbeStatus::Error,
                message: format!("Storage error: {e}"),
            }
        }
    }
}
