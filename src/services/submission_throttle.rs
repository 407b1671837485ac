use crate::error::{AppError, StoreOperation};
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use axum::response::{IntoResponse, Response};
use ipnetwork::IpNetwork;
use opentelemetry::{global, metrics::Counter};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_governor::GovernorError;
use tower_governor::key_extractor::KeyExtractor;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolves the visitor address a contact submission is counted against.
#[derive(Clone, Debug)]
pub struct VisitorKey {
    proxies: Arc<[IpNetwork]>,
}

impl VisitorKey {
    #[must_use]
    pub fn new(proxies: Vec<IpNetwork>) -> Self {
        Self { proxies: proxies.into() }
    }

    /// The direct peer, unless it is one of our proxies. Behind a proxy the visitor is the
    /// last forwarded hop that is not itself a proxy; every `X-Forwarded-For` header counts.
    #[must_use]
    pub fn visitor_ip(&self, headers: &HeaderMap, peer: IpAddr) -> IpAddr {
        if !self.is_proxy(peer) {
            return peer;
        }

        let hops: Vec<IpAddr> = headers
            .get_all(FORWARDED_FOR)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .filter_map(|hop| hop.trim().parse().ok())
            .collect();

        hops.into_iter().rev().find(|ip| !self.is_proxy(*ip)).unwrap_or(peer)
    }

    fn is_proxy(&self, ip: IpAddr) -> bool {
        self.proxies.iter().any(|net| net.contains(ip))
    }
}

impl KeyExtractor for VisitorKey {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let ConnectInfo(peer) =
            req.extensions().get::<ConnectInfo<SocketAddr>>().ok_or(GovernorError::UnableToExtractKey)?;

        Ok(self.visitor_ip(req.headers(), peer.ip()))
    }
}

/// Caps how often one visitor may post the contact form.
#[derive(Clone, Debug)]
pub struct SubmissionThrottle {
    pub key: VisitorKey,
    throttled_total: Counter<u64>,
}

impl SubmissionThrottle {
    #[must_use]
    pub fn new(trusted_proxies: Vec<IpNetwork>) -> Self {
        let meter = global::meter(crate::telemetry::SERVICE);
        Self {
            key: VisitorKey::new(trusted_proxies),
            throttled_total: meter
                .u64_counter("inquiry_submissions_throttled_total")
                .with_description("Contact submissions refused by the per-visitor limit")
                .build(),
        }
    }

    /// Renders a limiter refusal as the public failure envelope.
    #[must_use]
    pub fn reject(&self, error: GovernorError) -> Response {
        match error {
            GovernorError::TooManyRequests { wait_time, headers } => {
                self.throttled_total.add(1, &[]);
                tracing::warn!(retry_after_secs = wait_time, "Contact submission throttled");

                let mut response = AppError::Throttled.into_response();
                if let Some(headers) = headers {
                    response.headers_mut().extend(headers);
                }
                response
            }
            GovernorError::UnableToExtractKey => {
                tracing::error!("Submission arrived without a peer address");
                AppError::Internal(StoreOperation::Create).into_response()
            }
            GovernorError::Other { code, msg, .. } => {
                tracing::error!(status = %code, detail = ?msg, "Submission limiter failed");
                AppError::Internal(StoreOperation::Create).into_response()
            }
        }
    }
}
