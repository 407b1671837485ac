//! Submitting side of the inquiry pipeline.
//!
//! [`InquiryClient`] talks to `/api/contact`; [`ContactForm`] holds what a visitor
//! typed, checks it with the same rules the server uses and turns the result into a
//! notification.

use crate::api::schemas::contact::{ErrorResponse, ListInquiriesResponse, SubmitInquiryResponse};
use crate::domain::inquiry::{ContactInquiry, InquiryForm, InsertContactInquiry};
use crate::domain::validation::ValidationError;
use reqwest::StatusCode;
use thiserror::Error;

pub mod form;

pub use form::{ContactForm, FormOutcome, Toast, ToastVariant};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct InquiryClient {
    http: reqwest::Client,
    base_url: String,
}

impl InquiryClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/contact", self.base_url)
    }

    /// Validates the form locally and, only if it passes, posts it.
    ///
    /// # Errors
    /// Returns `ClientError::Validation` without sending anything if a field rule fails;
    /// otherwise see [`InquiryClient::send`].
    pub async fn submit(&self, form: &InquiryForm) -> Result<ContactInquiry, ClientError> {
        let input = form.validate()?;
        self.send(&input).await
    }

    /// Posts an already validated inquiry.
    ///
    /// # Errors
    /// Returns `ClientError::Transport` if the server cannot be reached,
    /// `ClientError::Rejected` for any non-2xx answer and `ClientError::Decode` if a
    /// success body does not have the expected shape.
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint()))]
    pub async fn send(&self, input: &InsertContactInquiry) -> Result<ContactInquiry, ClientError> {
        let response = self.http.post(self.endpoint()).json(input).send().await?;
        let body: SubmitInquiryResponse = Self::decode(response).await?;
        Ok(body.data)
    }

    /// Fetches every stored inquiry, newest first.
    ///
    /// # Errors
    /// Same failure modes as [`InquiryClient::send`].
    pub async fn list(&self) -> Result<Vec<ContactInquiry>, ClientError> {
        let response = self.http.get(self.endpoint()).send().await?;
        let body: ListInquiriesResponse = Self::decode(response).await?;
        Ok(body.data)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text).map_or(text, |body| body.message);
            tracing::debug!(status = %status, message = %message, "Inquiry request rejected");
            return Err(ClientError::Rejected { status, message });
        }
        response.json().await.map_err(ClientError::Decode)
    }
}
