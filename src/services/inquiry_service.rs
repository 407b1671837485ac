use crate::domain::inquiry::ContactInquiry;
use crate::domain::validation;
use crate::error::{AppError, Result, StoreOperation};
use crate::storage::InquiryStore;
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub submissions_total: Counter<u64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter(crate::telemetry::SERVICE);
        Self {
            submissions_total: meter
                .u64_counter("inquiry_submissions_total")
                .with_description("Contact inquiry submissions by outcome (accepted/rejected/failed)")
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
pub struct InquiryService {
    store: Arc<dyn InquiryStore>,
    metrics: Metrics,
}

impl InquiryService {
    #[must_use]
    pub fn new(store: Arc<dyn InquiryStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Validates a raw submission and stores it.
    ///
    /// The body is checked here regardless of what the submitting side already did.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if any field rule fails; nothing is stored then.
    /// Returns `AppError::Storage` if the store rejects the write.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&self, body: &Value) -> Result<ContactInquiry> {
        let input = match validation::parse(body) {
            Ok(input) => input,
            Err(e) => {
                self.record("rejected");
                return Err(e.into());
            }
        };

        match self.store.create(input).await {
            Ok(inquiry) => {
                self.record("accepted");
                tracing::info!(inquiry_id = %inquiry.id, "Contact inquiry received");
                Ok(inquiry)
            }
            Err(source) => {
                self.record("failed");
                Err(AppError::Storage { op: StoreOperation::Create, source })
            }
        }
    }

    /// All inquiries, newest first.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the store cannot be read.
    pub async fn list(&self) -> Result<Vec<ContactInquiry>> {
        self.store.list().await.map_err(|source| AppError::Storage { op: StoreOperation::List, source })
    }

    /// Looks an inquiry up by its textual id. Ids that do not parse were never issued,
    /// so they resolve to `None` as well.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the store cannot be read.
    pub async fn find(&self, id: &str) -> Result<Option<ContactInquiry>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        self.store.get_by_id(&id).await.map_err(|source| AppError::Storage { op: StoreOperation::Get, source })
    }

    fn record(&self, outcome: &'static str) {
        self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}
