use crate::domain::inquiry::{ContactInquiry, InsertContactInquiry};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;

pub use memory::MemoryInquiryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("inquiry store unavailable: {0}")]
    Unavailable(String),
}

/// Registry of contact inquiries.
///
/// `create` is the only mutator and the only place identity is allocated. Records are
/// never updated or removed.
#[async_trait]
pub trait InquiryStore: Send + Sync + Debug + 'static {
    /// Stores a validated inquiry under a fresh id and the current time.
    async fn create(&self, input: InsertContactInquiry) -> Result<ContactInquiry, StoreError>;

    /// All records, newest `created_at` first. Records sharing a timestamp come out
    /// most-recently-inserted first.
    async fn list(&self) -> Result<Vec<ContactInquiry>, StoreError>;

    /// Point lookup. Absence is `Ok(None)`, never an error.
    async fn get_by_id(&self, id: &Uuid) -> Result<Option<ContactInquiry>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
