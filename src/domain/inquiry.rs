use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    pub id: Uuid,
    pub nama: String,
    pub email: String,
    pub no_telepon: String,
    pub pesan: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ContactInquiry {
    #[must_use]
    pub(crate) fn from_insert(id: Uuid, input: InsertContactInquiry, created_at: OffsetDateTime) -> Self {
        let InsertContactInquiry { nama, email, no_telepon, pesan } = input;
        Self { id, nama, email, no_telepon, pesan, created_at }
    }
}

/// The four user-supplied fields of an inquiry, after validation.
///
/// Only the validation schema can build one of these, so anything handed to a store
/// has already passed the field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertContactInquiry {
    nama: String,
    email: String,
    no_telepon: String,
    pesan: String,
}

impl InsertContactInquiry {
    pub(crate) const fn new(nama: String, email: String, no_telepon: String, pesan: String) -> Self {
        Self { nama, email, no_telepon, pesan }
    }

    #[must_use]
    pub fn nama(&self) -> &str {
        &self.nama
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn no_telepon(&self) -> &str {
        &self.no_telepon
    }

    #[must_use]
    pub fn pesan(&self) -> &str {
        &self.pesan
    }
}

/// Raw form values as typed by a visitor. Nothing here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryForm {
    pub nama: String,
    pub email: String,
    pub no_telepon: String,
    pub pesan: String,
}
