use crate::error::{AppError, StoreOperation};
use axum::{
    body::Body,
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Issues a v4 UUID for requests that arrive without an `x-request-id`.
/// A header supplied by the caller or an upstream proxy is kept as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeRequestUuidOrHeader;

impl MakeRequestId for MakeRequestUuidOrHeader {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string()).ok().map(RequestId::new)
    }
}

/// Turns a handler panic into the failure envelope of the operation that was running.
pub fn panic_response(
    op: StoreOperation,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response<Body> + Clone + Send + Sync + 'static {
    move |panic: Box<dyn Any + Send + 'static>| {
        let detail = panic
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| panic.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic payload");
        tracing::error!(panic = %detail, operation = %op, "Request handler panicked");

        AppError::Internal(op).into_response()
    }
}
