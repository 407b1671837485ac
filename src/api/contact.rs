use crate::api::AppState;
use crate::api::schemas::contact::{ListInquiriesResponse, SubmitInquiryResponse};
use crate::error::{AppError, Result};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};
use serde_json::{Map, Value};

/// Accepts a contact-form submission.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not JSON.
/// Returns `AppError::Validation` if any field rule fails.
/// Returns `AppError::Storage` if the inquiry could not be stored.
pub async fn submit_inquiry(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let value = parse_body(&headers, &body)?;
    let inquiry = state.inquiry_service.submit(&value).await?;

    Ok(Json(SubmitInquiryResponse::from(inquiry)))
}

/// Lists every stored inquiry, newest first. Unauthenticated.
///
/// # Errors
/// Returns `AppError::Storage` if the store cannot be read.
pub async fn list_inquiries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let inquiries = state.inquiry_service.list().await?;

    Ok(Json(ListInquiriesResponse::from(inquiries)))
}

// A missing or non-JSON body reads as an empty object so it fails field
// validation rather than JSON parsing.
fn parse_body(headers: &HeaderMap, body: &[u8]) -> Result<Value> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
