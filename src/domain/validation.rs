//! Field rules for contact inquiries.
//!
//! The same rules run on the submitting side ([`InquiryForm::validate`]) and on the
//! receiving side ([`parse`]), so both reject exactly the same inputs.

use crate::domain::inquiry::{InquiryForm, InsertContactInquiry};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

pub const NAMA_MIN_LEN: usize = 2;
pub const NO_TELEPON_MIN_LEN: usize = 10;
pub const PESAN_MIN_LEN: usize = 10;

// Leading-dot and double-dot checks are done outside the pattern.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

#[derive(Clone, Copy)]
enum Rule {
    MinLen(usize),
    Email,
}

struct FieldRule {
    key: &'static str,
    rule: Rule,
    message: &'static str,
}

const NAMA: FieldRule = FieldRule { key: "nama", rule: Rule::MinLen(NAMA_MIN_LEN), message: "Nama minimal 2 karakter" };
const EMAIL: FieldRule = FieldRule { key: "email", rule: Rule::Email, message: "Email tidak valid" };
const NO_TELEPON: FieldRule = FieldRule {
    key: "noTelepon",
    rule: Rule::MinLen(NO_TELEPON_MIN_LEN),
    message: "Nomor telepon minimal 10 digit",
};
const PESAN: FieldRule =
    FieldRule { key: "pesan", rule: Rule::MinLen(PESAN_MIN_LEN), message: "Pesan minimal 10 karakter" };

impl FieldRule {
    fn accepts(&self, value: &str) -> bool {
        match self.rule {
            Rule::MinLen(min) => utf16_len(value) >= min,
            Rule::Email => is_email(value),
        }
    }

    fn check_str(&self, value: &str, issues: &mut Vec<ValidationIssue>) -> Option<String> {
        if self.accepts(value) {
            Some(value.to_owned())
        } else {
            issues.push(ValidationIssue::at(self.key, self.message));
            None
        }
    }

    fn check_value(&self, object: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) -> Option<String> {
        match object.get(self.key) {
            None => {
                issues.push(ValidationIssue::at(self.key, "Required"));
                None
            }
            Some(Value::String(s)) => self.check_str(s, issues),
            Some(other) => {
                issues.push(ValidationIssue::at(self.key, format!("Expected string, received {}", type_name(other))));
                None
            }
        }
    }
}

/// One violated constraint. An empty `path` refers to the input as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn at(path: &str, message: impl Into<String>) -> Self {
        Self { path: path.to_owned(), message: message.into() }
    }

    fn root(message: impl Into<String>) -> Self {
        Self { path: String::new(), message: message.into() }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} at \"{}\"", self.message, self.path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation error: {}", render_issues(.issues))]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// First message reported for a field, the way a form shows it under the input.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.issues.iter().find(|issue| issue.path == field).map(|issue| issue.message.as_str())
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Validates an arbitrary JSON value as an inquiry submission.
///
/// Unknown keys are dropped. Every violated rule is reported, not just the first.
///
/// # Errors
/// Returns a [`ValidationError`] listing each field that failed and why.
pub fn parse(value: &Value) -> Result<InsertContactInquiry, ValidationError> {
    let Value::Object(object) = value else {
        return Err(ValidationError {
            issues: vec![ValidationIssue::root(format!("Expected object, received {}", type_name(value)))],
        });
    };

    let mut issues = Vec::new();
    let nama = NAMA.check_value(object, &mut issues);
    let email = EMAIL.check_value(object, &mut issues);
    let no_telepon = NO_TELEPON.check_value(object, &mut issues);
    let pesan = PESAN.check_value(object, &mut issues);

    finish(nama, email, no_telepon, pesan, issues)
}

impl InquiryForm {
    /// Runs the shared field rules over the current form values.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] listing each field that failed and why.
    pub fn validate(&self) -> Result<InsertContactInquiry, ValidationError> {
        let mut issues = Vec::new();
        let nama = NAMA.check_str(&self.nama, &mut issues);
        let email = EMAIL.check_str(&self.email, &mut issues);
        let no_telepon = NO_TELEPON.check_str(&self.no_telepon, &mut issues);
        let pesan = PESAN.check_str(&self.pesan, &mut issues);

        finish(nama, email, no_telepon, pesan, issues)
    }
}

fn finish(
    nama: Option<String>,
    email: Option<String>,
    no_telepon: Option<String>,
    pesan: Option<String>,
    issues: Vec<ValidationIssue>,
) -> Result<InsertContactInquiry, ValidationError> {
    match (nama, email, no_telepon, pesan) {
        (Some(nama), Some(email), Some(no_telepon), Some(pesan)) if issues.is_empty() => {
            Ok(InsertContactInquiry::new(nama, email, no_telepon, pesan))
        }
        _ => Err(ValidationError { issues }),
    }
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

// Browser string lengths count UTF-16 code units, so a form that passes in the
// page must pass here too.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "nama": "Budi Santoso",
            "email": "budi@example.com",
            "noTelepon": "08123456789",
            "pesan": "Saya tertarik dengan unit tipe 36/72."
        })
    }

    #[test]
    fn test_parse_valid_body() {
        let input = parse(&valid_body()).expect("valid body");
        assert_eq!(input.nama(), "Budi Santoso");
        assert_eq!(input.email(), "budi@example.com");
        assert_eq!(input.no_telepon(), "08123456789");
        assert_eq!(input.pesan(), "Saya tertarik dengan unit tipe 36/72.");
    }

    #[test]
    fn test_parse_drops_unknown_keys() {
        let mut body = valid_body();
        body["id"] = json!("client-chosen-id");
        body["createdAt"] = json!("2020-01-01T00:00:00Z");

        let input = parse(&body).expect("extra keys are ignored");
        let serialized = serde_json::to_value(&input).expect("serializes");
        assert_eq!(serialized.as_object().map(Map::len), Some(4));
        assert!(serialized.get("id").is_none());
    }

    #[test]
    fn test_parse_short_nama() {
        let mut body = valid_body();
        body["nama"] = json!("A");

        let err = parse(&body).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Nama minimal 2 karakter at \"nama\"");
        assert_eq!(err.message_for("nama"), Some("Nama minimal 2 karakter"));
    }

    #[test]
    fn test_parse_invalid_email() {
        let mut body = valid_body();
        body["email"] = json!("not-an-email");

        let err = parse(&body).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Email tidak valid at \"email\"");
    }

    #[test]
    fn test_parse_short_phone_and_message_reports_both() {
        let mut body = valid_body();
        body["noTelepon"] = json!("123");
        body["pesan"] = json!("short");

        let err = parse(&body).unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert_eq!(
            err.to_string(),
            "Validation error: Nomor telepon minimal 10 digit at \"noTelepon\"; Pesan minimal 10 karakter at \"pesan\""
        );
    }

    #[test]
    fn test_parse_missing_and_mistyped_fields() {
        let body = json!({ "nama": 42, "email": null, "pesan": ["a"] });

        let err = parse(&body).unwrap_err();
        let rendered: Vec<String> = err.issues().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "Expected string, received number at \"nama\"",
                "Expected string, received null at \"email\"",
                "Required at \"noTelepon\"",
                "Expected string, received array at \"pesan\"",
            ]
        );
    }

    #[test]
    fn test_parse_non_object() {
        let err = parse(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Expected object, received array");
        assert_eq!(err.issues()[0].path, "");
    }

    #[test]
    fn test_boundary_lengths() {
        let form = InquiryForm {
            nama: "Al".into(),
            email: "a@b.co".into(),
            no_telepon: "0812345678".into(),
            pesan: "1234567890".into(),
        };
        assert!(form.validate().is_ok());

        let shorter = InquiryForm { no_telepon: "081234567".into(), ..form };
        assert_eq!(shorter.validate().unwrap_err().message_for("noTelepon"), Some("Nomor telepon minimal 10 digit"));
    }

    #[test]
    fn test_phone_has_no_format_rule() {
        let form = InquiryForm {
            nama: "Siti".into(),
            email: "siti@example.com".into(),
            no_telepon: "call me maybe".into(),
            pesan: "Ada promo bulan ini?".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // One astral-plane character is two UTF-16 units.
        assert_eq!(utf16_len("😀"), 2);
        let form = InquiryForm {
            nama: "😀".into(),
            email: "emoji@example.com".into(),
            no_telepon: "08123456789".into(),
            pesan: "Halo, saya mau tanya.".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let err = InquiryForm::default().validate().unwrap_err();
        let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["nama", "email", "noTelepon", "pesan"]);
    }

    #[test]
    fn test_email_grammar() {
        for ok in ["budi@example.com", "budi.santoso+promo@mail.example.co.id", "o'neil@example.org", "A_B@Example.COM"] {
            assert!(is_email(ok), "{ok} should be accepted");
        }
        for bad in [
            "not-an-email",
            ".budi@example.com",
            "budi..santoso@example.com",
            "budi.@example.com",
            "budi@example",
            "budi@example.c",
            "budi@-example.com",
            "budi@example.com ",
            "@example.com",
            "budi@@example.com",
        ] {
            assert!(!is_email(bad), "{bad} should be rejected");
        }
    }
}
