use crate::api::MgmtState;
use crate::api::schemas::health::HealthResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Liveness probe: returns 200 OK as long as the server is running.
pub async fn livez() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe: checks that the inquiry store answers.
pub async fn readyz(State(state): State<MgmtState>) -> impl IntoResponse {
    match state.health_service.check_store().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse { status: "ok".to_string(), store: "ok".to_string(), inquiries: Some(count) }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, component = "store", "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "error".to_string(), store: "error".to_string(), inquiries: None }),
            )
        }
    }
}
