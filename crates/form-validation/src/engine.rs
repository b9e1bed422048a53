//! Validation engine

use crate::rules::{EmailFormat, FieldRule, MaxLength, MinLength, PhoneFormat, Required};
use form_schema::{FieldDef, FormErrors, FormValue, FormValues, Section};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Applies an ordered list of rules to a single field.
///
/// Every rule runs on every value. When several rules fail, the message of
/// the last failing rule is kept.
#[derive(Clone)]
pub struct FieldValidator {
    rules: Vec<Arc<dyn FieldRule>>,
}

impl FieldValidator {
    /// Validator with the standard rules: required, minimum length, maximum
    /// length, email format, phone format.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Arc::new(Required),
                Arc::new(MinLength),
                Arc::new(MaxLength),
                Arc::new(EmailFormat),
                Arc::new(PhoneFormat),
            ],
        }
    }

    /// Validator with no rules at all
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones
    #[must_use]
    pub fn with_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the rules, in evaluation order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    /// Validate one value against one field definition
    #[must_use]
    pub fn validate(&self, field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
        self.rules.iter().fold(None, |current, rule| {
            match rule.check(field, value) {
                Some(message) => {
                    trace!(field = %field.field_id, rule = rule.name(), "rule failed");
                    Some(message)
                }
                None => current,
            }
        })
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

/// Outcome of validating one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    /// Section that was validated
    pub section_id: String,
    /// Failing fields only, keyed by field id
    pub errors: FormErrors,
}

impl SectionReport {
    /// Whether every field passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> FormErrors {
        self.errors
    }
}

/// Runs the field validator over every field of a section
#[derive(Debug, Clone, Default)]
pub struct SectionValidator {
    fields: FieldValidator,
}

impl SectionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a specific field validator
    pub fn with_field_validator(fields: FieldValidator) -> Self {
        Self { fields }
    }

    pub fn field_validator(&self) -> &FieldValidator {
        &self.fields
    }

    /// Validate a section against the current values. `values` is not modified.
    #[must_use]
    pub fn validate(&self, section: &Section, values: &FormValues) -> SectionReport {
        let errors: FormErrors = section
            .fields
            .iter()
            .filter_map(|field| {
                self.fields
                    .validate(field, values.get(&field.field_id))
                    .map(|message| (field.field_id.clone(), message))
            })
            .collect();

        debug!(
            section = %section.section_id,
            failing = errors.len(),
            "validated section"
        );

        SectionReport {
            section_id: section.section_id.clone(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
    use form_schema::FieldType;

    struct NoDigits;

    impl FieldRule for NoDigits {
        fn name(&self) -> &'static str {
            "no_digits"
        }

        fn check(&self, _field: &FieldDef, value: Option<&FormValue>) -> Option<String> {
            value
                .and_then(FormValue::as_text)
                .filter(|s| s.chars().any(|c| c.is_ascii_digit()))
                .map(|_| "Digits are not allowed".to_string())
        }
    }

    fn contact_section() -> Section {
        Section::new("contact", "Contact").with_fields(vec![
            FieldDef::new("name", "Name", FieldType::Text).required().min_length(2),
            FieldDef::new("email", "Email", FieldType::Email).required(),
            FieldDef::new("phone", "Phone", FieldType::Tel),
        ])
    }

    #[test]
    fn test_standard_rule_order() {
        let names: Vec<_> = FieldValidator::new().rule_names().collect();
        assert_eq!(
            names,
            ["required", "min_length", "max_length", "email_format", "phone_format"]
        );
    }

    #[test]
    fn test_later_rule_overwrites_earlier_message() {
        let field = FieldDef::new("email", "Email", FieldType::Email).min_length(10);
        let value = FormValue::text("abc");

        let message = FieldValidator::new().validate(&field, Some(&value));
        assert_eq!(message.as_deref(), Some(EMAIL_MESSAGE));
    }

    #[test]
    fn test_required_missing_value_reports_required() {
        let field = FieldDef::new("email", "Email", FieldType::Email)
            .required()
            .min_length(5);
        let message = FieldValidator::new().validate(&field, None);
        assert_eq!(message.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_required_empty_text_is_overwritten_by_min_length() {
        let field = FieldDef::new("email", "Email", FieldType::Email)
            .required()
            .min_length(5);
        let message = FieldValidator::new().validate(&field, Some(&FormValue::text("")));
        assert_eq!(message.as_deref(), Some("Minimum 5 characters required"));
    }

    #[test]
    fn test_required_blank_values_against_each_constraint() {
        let required = |field_type| FieldDef::new("f", "F", field_type).required();
        let empty = FormValue::text("");
        let space = FormValue::text(" ");

        // (field, value, expected message)
        let cases = [
            (required(FieldType::Text).min_length(3), None, Some(REQUIRED_MESSAGE.to_string())),
            (required(FieldType::Text).min_length(3), Some(&empty), Some("Minimum 3 characters required".to_string())),
            (required(FieldType::Text).min_length(3), Some(&space), Some("Minimum 3 characters required".to_string())),
            (required(FieldType::Text).max_length(3), None, Some(REQUIRED_MESSAGE.to_string())),
            (required(FieldType::Text).max_length(3), Some(&empty), Some(REQUIRED_MESSAGE.to_string())),
            (required(FieldType::Text).max_length(3), Some(&space), None),
            (required(FieldType::Email), None, Some(REQUIRED_MESSAGE.to_string())),
            (required(FieldType::Email), Some(&empty), Some(REQUIRED_MESSAGE.to_string())),
            (required(FieldType::Email), Some(&space), None),
            (required(FieldType::Tel), None, Some(REQUIRED_MESSAGE.to_string())),
            (required(FieldType::Tel), Some(&empty), Some(REQUIRED_MESSAGE.to_string())),
            (required(FieldType::Tel), Some(&space), None),
        ];

        let validator = FieldValidator::new();
        for (field, value, expected) in cases {
            assert_eq!(
                validator.validate(&field, value),
                expected,
                "{} field with {value:?}",
                field.field_type
            );
        }
    }

    #[test]
    fn test_required_space_hits_min_length() {
        let field = FieldDef::new("name", "Name", FieldType::Text)
            .required()
            .min_length(2);
        let message = FieldValidator::new().validate(&field, Some(&FormValue::text(" ")));
        assert_eq!(message.as_deref(), Some("Minimum 2 characters required"));
    }

    #[test]
    fn test_custom_rule_runs_last() {
        let validator = FieldValidator::new().with_rule(NoDigits);
        let field = FieldDef::new("name", "Name", FieldType::Text).min_length(5);

        let message = validator.validate(&field, Some(&FormValue::text("a1")));
        assert_eq!(message.as_deref(), Some("Digits are not allowed"));
        assert_eq!(validator.rule_names().last(), Some("no_digits"));
    }

    #[test]
    fn test_empty_validator_accepts_everything() {
        let field = FieldDef::new("name", "Name", FieldType::Text).required();
        assert!(FieldValidator::empty().validate(&field, None).is_none());
    }

    #[test]
    fn test_section_collects_only_failing_fields() {
        let mut values = FormValues::new();
        values.set("name", "Asha");
        values.set("phone", "123");

        let report = SectionValidator::new().validate(&contact_section(), &values);

        assert!(!report.is_valid());
        assert_eq!(report.section_id, "contact");
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors.get("email"), Some(REQUIRED_MESSAGE));
        assert!(report.errors.get("phone").is_some_and(|m| m.contains("10-digit")));
        assert!(!report.errors.contains("name"));
    }

    #[test]
    fn test_section_valid_when_all_fields_pass() {
        let values: FormValues = [("name", "Asha"), ("email", "asha@example.com")]
            .into_iter()
            .collect();

        let report = SectionValidator::new().validate(&contact_section(), &values);
        assert!(report.is_valid());
        assert!(report.into_errors().is_empty());
    }

    #[test]
    fn test_section_validation_does_not_touch_values() {
        let values: FormValues = [("name", "A")].into_iter().collect();
        let before = values.clone();
        let _ = SectionValidator::new().validate(&contact_section(), &values);
        assert_eq!(values, before);
    }

    #[test]
    fn test_empty_section_is_valid() {
        let section = Section::new("empty", "Nothing here");
        let report = SectionValidator::new().validate(&section, &FormValues::new());
        assert!(report.is_valid());
    }
}
