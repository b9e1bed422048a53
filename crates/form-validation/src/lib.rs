#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # form-validation
//!
//! Field and section validation for form values.
//!
//! Validation failures are data, not errors: a field either yields a message
//! or it does not, and a section yields the map of failing fields.
//!
//! ## Example Usage
//!
//! ```rust
//! use form_schema::{FieldDef, FieldType, FormValues, Section};
//! use form_validation::SectionValidator;
//!
//! let section = Section::new("contact", "Contact").with_fields(vec![
//!     FieldDef::new("email", "Email", FieldType::Email).required(),
//! ]);
//!
//! let mut values = FormValues::new();
//! values.set("email", "not-an-email");
//!
//! let report = SectionValidator::new().validate(&section, &values);
//! assert!(!report.is_valid());
//! assert_eq!(report.errors.get("email"), Some("Please enter a valid email address"));
//! ```

pub mod engine;
pub mod rules;

// Re-export main types
pub use engine::{FieldValidator, SectionReport, SectionValidator};
pub use rules::{
    EMAIL_MESSAGE, EmailFormat, FieldRule, MaxLength, MinLength, PHONE_MESSAGE, PhoneFormat,
    REQUIRED_MESSAGE, Required, is_valid_email, is_valid_phone,
};

use form_schema::{FieldDef, FormValue, FormValues, Section};

/// Convenience function to validate one field with the standard rules
#[must_use]
pub fn validate_field(field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
    FieldValidator::new().validate(field, value)
}

/// Convenience function to validate a section with the standard rules
#[must_use]
pub fn validate_section(section: &Section, values: &FormValues) -> SectionReport {
    SectionValidator::new().validate(section, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_schema::FieldType;

    #[test]
    fn test_convenience_validate_field() {
        let field = FieldDef::new("phone", "Phone", FieldType::Tel).required();
        assert!(validate_field(&field, Some(&FormValue::text("123-456-7890"))).is_none());
        assert_eq!(validate_field(&field, None).as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_convenience_validate_section() {
        let section = Section::new("s", "S")
            .with_fields(vec![FieldDef::new("x", "X", FieldType::Text).required()]);
        let report = validate_section(&section, &FormValues::new());
        assert_eq!(report.errors.get("x"), Some(REQUIRED_MESSAGE));
    }
}
