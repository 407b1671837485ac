use crate::config::HealthConfig;
use crate::storage::InquiryStore;
use opentelemetry::{KeyValue, global, metrics::Gauge};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub status: Gauge<i64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter(crate::telemetry::SERVICE);
        Self {
            status: meter
                .i64_gauge("health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn InquiryStore>,
    config: HealthConfig,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn InquiryStore>, config: HealthConfig) -> Self {
        Self { store, config, metrics: Metrics::new() }
    }

    /// Checks that the inquiry store answers in time and reports how many records it holds.
    ///
    /// # Errors
    /// Returns a string describing the failure if the store errors or times out.
    pub async fn check_store(&self) -> Result<usize, String> {
        let store_timeout = Duration::from_millis(self.config.store_timeout_ms);

        match timeout(store_timeout, self.store.count()).await {
            Ok(Ok(count)) => {
                self.metrics.status.record(1, &[KeyValue::new("component", "store")]);
                Ok(count)
            }
            Ok(Err(e)) => {
                self.metrics.status.record(0, &[KeyValue::new("component", "store")]);
                Err(format!("Inquiry store check failed: {e}"))
            }
            Err(_) => {
                self.metrics.status.record(0, &[KeyValue::new("component", "store")]);
                Err("Inquiry store check timed out".to_string())
            }
        }
    }
}
