//! Field rules for incoming email requests.
//!
//! Every check runs without network access and never panics: a missing or
//! non-string field is simply invalid.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::mail::EmailRequest;

/// Loose shape check. Matched from the start of the input only, so trailing
/// text after the first `x@y.z` is accepted, while `user@localhost` is not.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("valid email pattern"));

const SUBJECT_MAX_CHARS: usize = 100;

pub fn validate_email(value: Option<&str>) -> bool {
    value.is_some_and(|email| EMAIL_SHAPE.is_match(email))
}

/// Subject length is counted in characters, not bytes.
pub fn validate_subject(value: Option<&str>) -> bool {
    value.is_some_and(|subject| (1..=SUBJECT_MAX_CHARS).contains(&subject.chars().count()))
}

pub fn validate_body(value: Option<&str>) -> bool {
    value.is_some_and(|body| !body.trim_matches(is_blank).is_empty())
}

/// Unicode whitespace plus the ASCII file/group/record/unit separators.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Subject,
    Body,
}

impl Field {
    fn message(self) -> &'static str {
        match self {
            Field::Email => "Invalid email format.",
            Field::Subject => "Subject must be between 1 and 100 characters.",
            Field::Body => "Body must not be empty.",
        }
    }
}

/// Failing fields and their messages. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    fn reject(&mut self, field: Field) {
        self.0.insert(field, field.message());
    }
}

/// Request payload as received, before validation.
///
/// Keys that are absent or not JSON strings are kept as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailPayload {
    pub email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl EmailPayload {
    /// Parse a request body. Returns `None` unless it is a non-empty JSON object.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        Self::from_value(serde_json::from_slice(bytes).ok()?)
    }

    /// Accept a decoded JSON value. Returns `None` unless it is a non-empty object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) if !map.is_empty() => Some(Self::from_map(&map)),
            _ => None,
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            email: text("email"),
            subject: text("subject"),
            body: text("body"),
        }
    }

    /// Check every field and either accept the whole request or report every failure.
    pub fn validate(self) -> Result<EmailRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !validate_email(self.email.as_deref()) {
            errors.reject(Field::Email);
        }
        if !validate_subject(self.subject.as_deref()) {
            errors.reject(Field::Subject);
        }
        if !validate_body(self.body.as_deref()) {
            errors.reject(Field::Body);
        }

        match (self.email, self.subject, self.body) {
            (Some(email), Some(subject), Some(body)) if errors.is_empty() => {
                Ok(EmailRequest::new(email, subject, body))
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(email: &str, subject: &str, body: &str) -> EmailPayload {
        EmailPayload {
            email: Some(email.into()),
            subject: Some(subject.into()),
            body: Some(body.into()),
        }
    }

    #[test]
    fn email_shape() {
        for valid in [
            "a@b.com",
            "first.last@sub.example.org",
            "x@y.z",
            "a b@c.d",
            "a@b.c@d",
        ] {
            assert!(validate_email(Some(valid)), "{valid} should pass");
        }

        for invalid in [
            "",
            "not-an-email",
            "user@localhost",
            "@b.com",
            "a@.com",
            "a@@b.com",
            "a@b.",
            "a.b@c",
            "user@host.",
        ] {
            assert!(!validate_email(Some(invalid)), "{invalid} should fail");
        }

        assert!(!validate_email(None));
    }

    #[test]
    fn subject_length_bounds() {
        assert!(!validate_subject(Some("")));
        assert!(validate_subject(Some("H")));
        assert!(validate_subject(Some(&"s".repeat(100))));
        assert!(!validate_subject(Some(&"s".repeat(101))));
        assert!(validate_subject(Some("   ")));
        assert!(!validate_subject(None));
    }

    #[test]
    fn subject_counts_characters() {
        // 100 characters, 200 bytes
        assert!(validate_subject(Some(&"é".repeat(100))));
        assert!(!validate_subject(Some(&"é".repeat(101))));
    }

    #[test]
    fn body_needs_non_whitespace() {
        assert!(!validate_body(Some("")));
        assert!(!validate_body(Some(" \t\r\n")));
        assert!(!validate_body(Some("\u{3000}\u{a0}")));
        assert!(validate_body(Some("  x  ")));
        assert!(!validate_body(None));
    }

    #[test]
    fn body_ignores_ascii_separators() {
        for blank in ["\u{1c}", "\u{1d}", "\u{1e}", "\u{1f}", " \u{1c}\t\u{1f} "] {
            assert!(!validate_body(Some(blank)), "{blank:?} should fail");
        }
        assert!(validate_body(Some("\u{1c}x\u{1f}")));
    }

    #[test]
    fn valid_payload_becomes_request() {
        let request = payload("a@b.com", "Hi", "Hello").validate().unwrap();

        assert_eq!(request.recipient(), "a@b.com");
        assert_eq!(request.subject(), "Hi");
        assert_eq!(request.body(), "Hello");
    }

    #[test]
    fn errors_are_collected_not_short_circuited() {
        let errors = payload("not-an-email", "", "  ").validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Email), Some("Invalid email format."));
        assert_eq!(
            errors.get(Field::Subject),
            Some("Subject must be between 1 and 100 characters.")
        );
        assert_eq!(errors.get(Field::Body), Some("Body must not be empty."));

        let errors = payload("nope", "", "fine").validate().unwrap_err();
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::Subject));
        assert!(!errors.contains(Field::Body));
    }

    #[test]
    fn validation_is_repeatable() {
        let input = payload("a@b.com", "", "Hello");
        assert_eq!(input.clone().validate(), input.validate());
    }

    #[test]
    fn parse_rejects_non_objects() {
        let bodies: [&[u8]; 8] = [b"", b"not json", b"null", b"[]", b"[1]", b"\"text\"", b"42", b"{}"];
        for body in bodies {
            assert_eq!(EmailPayload::from_slice(body), None);
        }
    }

    #[test]
    fn from_value_requires_non_empty_object() {
        assert_eq!(EmailPayload::from_value(json!({})), None);
        assert_eq!(EmailPayload::from_value(json!(["a@b.com"])), None);
        assert_eq!(
            EmailPayload::from_value(json!({"email": "a@b.com"})),
            Some(EmailPayload {
                email: Some("a@b.com".into()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn parse_keeps_only_string_fields() {
        let bytes = serde_json::to_vec(&json!({
            "email": 42,
            "subject": null,
            "body": "Hello",
            "extra": true,
        }))
        .unwrap();

        let parsed = EmailPayload::from_slice(&bytes).unwrap();
        assert_eq!(
            parsed,
            EmailPayload {
                email: None,
                subject: None,
                body: Some("Hello".into()),
            }
        );

        let errors = parsed.validate().unwrap_err();
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::Subject));
        assert!(!errors.contains(Field::Body));
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let errors = payload("x", "ok", "").validate().unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({
                "email": "Invalid email format.",
                "body": "Body must not be empty.",
            })
        );
    }
}
