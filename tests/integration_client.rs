#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]
use pacific_garden_server::client::{ClientError, ContactForm, FormOutcome, InquiryClient, Toast, ToastVariant};
use pacific_garden_server::domain::inquiry::InquiryForm;
use pacific_garden_server::storage::InquiryStore;
use std::sync::Arc;

mod common;

fn filled_form() -> InquiryForm {
    InquiryForm {
        nama: "Budi Santoso".into(),
        email: "budi@example.com".into(),
        no_telepon: "08123456789".into(),
        pesan: "Saya tertarik dengan unit tipe 36/72.".into(),
    }
}

#[tokio::test]
async fn test_form_submission_success_resets_form() {
    let app = common::TestApp::spawn().await;
    let client = InquiryClient::new(format!("{}/", app.server_url));
    let mut form = ContactForm::new();
    form.values = filled_form();

    let outcome = form.submit(&client).await;

    let (inquiry, toast) = match outcome {
        FormOutcome::Submitted { inquiry, toast } => (inquiry, toast),
        other => panic!("expected submission to succeed, got {other:?}"),
    };
    assert_eq!(toast, Toast::success());
    assert_eq!(toast.title, "Pesan Terkirim!");
    assert_eq!(toast.variant, ToastVariant::Default);
    assert_eq!(inquiry.nama, "Budi Santoso");
    assert_eq!(form.values, InquiryForm::default());

    let listed = client.list().await.unwrap();
    assert_eq!(listed, vec![inquiry]);
}

#[tokio::test]
async fn test_form_submission_server_failure_keeps_values() {
    let app = common::TestApp::spawn_with_store(Arc::new(common::FailingStore)).await;
    let client = InquiryClient::new(app.server_url.clone());
    let mut form = ContactForm::new();
    form.values = filled_form();

    let outcome = form.submit(&client).await;

    let (error, toast) = match outcome {
        FormOutcome::Failed { error, toast } => (error, toast),
        other => panic!("expected submission to fail, got {other:?}"),
    };
    assert_eq!(toast.title, "Gagal Mengirim");
    assert_eq!(toast.description, "Terjadi kesalahan. Silakan coba lagi.");
    assert_eq!(toast.variant, ToastVariant::Destructive);
    match error {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "Terjadi kesalahan. Silakan coba lagi.");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(form.values, filled_form());
}

#[tokio::test]
async fn test_client_rejects_locally_before_sending() {
    let app = common::TestApp::spawn().await;
    let client = InquiryClient::new(app.server_url.clone());
    let form = InquiryForm { email: "not-an-email".into(), ..filled_form() };

    let err = client.submit(&form).await.unwrap_err();

    let validation = match err {
        ClientError::Validation(validation) => validation,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert_eq!(validation.message_for("email"), Some("Email tidak valid"));
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_client_and_server_agree_on_rules() {
    // Whatever the client lets through, the server accepts, and vice versa.
    let app = common::TestApp::spawn().await;
    let forms = [
        filled_form(),
        InquiryForm { nama: "Al".into(), ..filled_form() },
        InquiryForm { nama: "A".into(), ..filled_form() },
        InquiryForm { email: "a.b@c.id".into(), ..filled_form() },
        InquiryForm { email: "a..b@c.id".into(), ..filled_form() },
        InquiryForm { no_telepon: "081234567".into(), ..filled_form() },
        InquiryForm { pesan: "1234567890".into(), ..filled_form() },
    ];

    for form in forms {
        let local_ok = form.validate().is_ok();
        let resp = app.submit(&serde_json::to_value(&form).unwrap()).await;
        assert_eq!(resp.status().is_success(), local_ok, "disagreement on {form:?}");
    }
}
