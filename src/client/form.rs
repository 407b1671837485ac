use crate::client::{ClientError, InquiryClient};
use crate::domain::inquiry::{ContactInquiry, InquiryForm};
use crate::domain::validation::ValidationError;

pub const SUCCESS_TITLE: &str = "Pesan Terkirim!";
pub const SUCCESS_DESCRIPTION: &str = "Terima kasih atas minat Anda. Tim kami akan segera menghubungi Anda.";
pub const FAILURE_TITLE: &str = "Gagal Mengirim";
pub const FAILURE_DESCRIPTION: &str = "Terjadi kesalahan. Silakan coba lagi.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: ToastVariant,
}

impl Toast {
    #[must_use]
    pub const fn success() -> Self {
        Self { title: SUCCESS_TITLE, description: SUCCESS_DESCRIPTION, variant: ToastVariant::Default }
    }

    #[must_use]
    pub const fn failure() -> Self {
        Self { title: FAILURE_TITLE, description: FAILURE_DESCRIPTION, variant: ToastVariant::Destructive }
    }
}

#[derive(Debug)]
pub enum FormOutcome {
    /// Local validation failed. Nothing was sent and no toast is shown; the
    /// messages belong next to the offending inputs.
    Invalid(ValidationError),
    Submitted { inquiry: ContactInquiry, toast: Toast },
    /// Any server-side or transport failure. The visitor sees the same generic toast.
    Failed { error: ClientError, toast: Toast },
}

impl FormOutcome {
    #[must_use]
    pub const fn toast(&self) -> Option<&Toast> {
        match self {
            Self::Invalid(_) => None,
            Self::Submitted { toast, .. } | Self::Failed { toast, .. } => Some(toast),
        }
    }
}

/// The contact form as the page holds it.
#[derive(Debug, Default)]
pub struct ContactForm {
    pub values: InquiryForm,
    pending: bool,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.pending { "Mengirim..." } else { "Kirim Pesan" }
    }

    /// Validates, sends and reports. Values are cleared only after the server accepted
    /// the inquiry.
    pub async fn submit(&mut self, client: &InquiryClient) -> FormOutcome {
        let input = match self.values.validate() {
            Ok(input) => input,
            Err(e) => return FormOutcome::Invalid(e),
        };

        let result = {
            let _pending = PendingGuard::start(&mut self.pending);
            client.send(&input).await
        };

        match result {
            Ok(inquiry) => {
                self.values = InquiryForm::default();
                FormOutcome::Submitted { inquiry, toast: Toast::success() }
            }
            Err(error) => {
                tracing::warn!(error = %error, "Contact form submission failed");
                FormOutcome::Failed { error, toast: Toast::failure() }
            }
        }
    }
}

/// Holds the pending flag up for as long as a request is in flight, including when the
/// submit future is dropped half way.
struct PendingGuard<'a>(&'a mut bool);

impl<'a> PendingGuard<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
