use crate::domain::inquiry::{ContactInquiry, InsertContactInquiry};
use crate::storage::{InquiryStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    // Insertion order. `created_at` is non-decreasing along this vector.
    records: Vec<ContactInquiry>,
    by_id: HashMap<Uuid, usize>,
}

/// Process-local store. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryInquiryStore {
    inner: RwLock<Inner>,
}

impl MemoryInquiryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InquiryStore for MemoryInquiryStore {
    #[tracing::instrument(skip_all)]
    async fn create(&self, input: InsertContactInquiry) -> Result<ContactInquiry, StoreError> {
        let mut inner = self.inner.write().await;

        let mut id = Uuid::new_v4();
        while inner.by_id.contains_key(&id) {
            id = Uuid::new_v4();
        }

        // A wall clock stepping backwards must not reorder the log.
        let now = OffsetDateTime::now_utc();
        let created_at = inner.records.last().map_or(now, |last| now.max(last.created_at));

        let inquiry = ContactInquiry::from_insert(id, input, created_at);
        let position = inner.records.len();
        inner.records.push(inquiry.clone());
        inner.by_id.insert(id, position);

        tracing::debug!(inquiry_id = %id, total = inner.records.len(), "Inquiry stored");
        Ok(inquiry)
    }

    async fn list(&self) -> Result<Vec<ContactInquiry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().rev().cloned().collect())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<ContactInquiry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.by_id.get(id).and_then(|&position| inner.records.get(position)).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().await.records.len())
    }
}
