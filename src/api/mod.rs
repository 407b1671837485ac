use crate::api::middleware::{MakeRequestUuidOrHeader, REQUEST_ID_HEADER, panic_response};
use crate::config::Config;
use crate::error::StoreOperation;
use crate::services::health_service::HealthService;
use crate::services::inquiry_service::InquiryService;
use crate::services::submission_throttle::SubmissionThrottle;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::{
    Router,
    handler::Handler,
    routing::{get, post},
};
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod contact;
pub mod health;
pub mod middleware;
pub mod schemas;

#[derive(Clone, Debug)]
pub struct AppState {
    pub inquiry_service: InquiryService,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct ServiceContainer {
    pub inquiry_service: InquiryService,
    pub submission_throttle: SubmissionThrottle,
}

/// Configures and returns the public API router.
///
/// # Errors
/// Returns an error if the rate limiter configuration is rejected.
pub fn app_router(config: &Config, services: ServiceContainer) -> anyhow::Result<Router> {
    let throttle = services.submission_throttle;
    let interval_ns = 1_000_000_000 / config.rate_limit.per_second.max(1);
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(interval_ns))
            .burst_size(config.rate_limit.burst.max(1))
            .key_extractor(throttle.key.clone())
            .finish()
            .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?,
    );
    let governor = GovernorLayer::new(governor_conf).error_handler(move |e| throttle.reject(e));

    // Only posting writes to the store, so only posting is throttled.
    let list = contact::list_inquiries.layer(CatchPanicLayer::custom(panic_response(StoreOperation::List)));
    let submit = contact::submit_inquiry.layer(CatchPanicLayer::custom(panic_response(StoreOperation::Create)));
    let contact_routes = get(list).merge(post(submit).layer(governor));

    let state = AppState { inquiry_service: services.inquiry_service };
    let api_routes = Router::new().route("/contact", contact_routes);

    let router = Router::new()
        .nest("/api", api_routes)
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                        let status = response.status();
                        span.record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER), MakeRequestUuidOrHeader))
        .with_state(state);

    Ok(router)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
