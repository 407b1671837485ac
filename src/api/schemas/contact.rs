use crate::domain::inquiry::ContactInquiry;
use serde::{Deserialize, Serialize};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Pesan berhasil diterima. Tim kami akan segera menghubungi Anda.";

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitInquiryResponse {
    pub success: bool,
    pub message: String,
    pub data: ContactInquiry,
}

impl From<ContactInquiry> for SubmitInquiryResponse {
    fn from(inquiry: ContactInquiry) -> Self {
        Self { success: true, message: SUBMIT_SUCCESS_MESSAGE.to_string(), data: inquiry }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListInquiriesResponse {
    pub success: bool,
    pub data: Vec<ContactInquiry>,
}

impl From<Vec<ContactInquiry>> for ListInquiriesResponse {
    fn from(inquiries: Vec<ContactInquiry>) -> Self {
        Self { success: true, data: inquiries }
    }
}

/// Body of every failed `/api` call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}
