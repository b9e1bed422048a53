//! Validation rules
//!
//! Each rule inspects one field definition and its current value in
//! isolation and either reports a message or stays silent. Rules do not know
//! about each other; ordering is the validator's concern.

use form_schema::{FieldDef, FieldType, FormValue};
use regex::Regex;
use std::sync::LazyLock;

/// Message used when a required field has no custom message
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Message for a malformed email address
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
/// Message for a phone number that is not ten digits
pub const PHONE_MESSAGE: &str = "Please enter a valid 10-digit phone number";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const PHONE_DIGITS: usize = 10;

/// A single independent check on one field value
pub trait FieldRule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Error message when the value violates this rule
    fn check(&self, field: &FieldDef, value: Option<&FormValue>) -> Option<String>;
}

/// Value must be present and non-empty when the field is required
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl FieldRule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(&self, field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
        if !field.required || value.is_some_and(|v| !v.is_empty()) {
            return None;
        }
        Some(
            field
                .custom_message()
                .unwrap_or(REQUIRED_MESSAGE)
                .to_string(),
        )
    }
}

/// Text values must reach the configured minimum length
#[derive(Debug, Clone, Copy, Default)]
pub struct MinLength;

impl FieldRule for MinLength {
    fn name(&self) -> &'static str {
        "min_length"
    }

    fn check(&self, field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
        let min = field.min_length?;
        let text = value.and_then(FormValue::as_text)?;
        (char_len(text) < min).then(|| format!("Minimum {min} characters required"))
    }
}

/// Text values must not exceed the configured maximum length
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLength;

impl FieldRule for MaxLength {
    fn name(&self) -> &'static str {
        "max_length"
    }

    fn check(&self, field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
        let max = field.max_length?;
        let text = value.and_then(FormValue::as_text)?;
        (char_len(text) > max).then(|| format!("Maximum {max} characters allowed"))
    }
}

/// Non-blank email values must look like `local@domain.tld`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailFormat;

impl FieldRule for EmailFormat {
    fn name(&self) -> &'static str {
        "email_format"
    }

    fn check(&self, field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
        if field.field_type != FieldType::Email {
            return None;
        }
        let text = non_blank_text(value)?;
        (!is_valid_email(text)).then(|| EMAIL_MESSAGE.to_string())
    }
}

/// Non-blank phone values must contain exactly ten digits
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneFormat;

impl FieldRule for PhoneFormat {
    fn name(&self) -> &'static str {
        "phone_format"
    }

    fn check(&self, field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
        if field.field_type != FieldType::Tel {
            return None;
        }
        let text = non_blank_text(value)?;
        (!is_valid_phone(text)).then(|| PHONE_MESSAGE.to_string())
    }
}

/// Email shape check: no whitespace, one `@`, a dot inside the domain
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Phone check on the digits-only projection of the value
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() == PHONE_DIGITS
}

fn non_blank_text(value: Option<&FormValue>) -> Option<&str> {
    value
        .and_then(FormValue::as_text)
        .filter(|s| !s.trim().is_empty())
}

/// Length in UTF-16 code units, the unit browsers use for `maxlength`
fn char_len(value: &str) -> usize {
    value.encode_utf16().count()
}
