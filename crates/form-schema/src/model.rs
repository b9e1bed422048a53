//! Form schema model definitions

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identity used to register with the service and to request a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub roll_number: String,
    pub name: String,
}

impl User {
    pub fn new(roll_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
            name: name.into(),
        }
    }

    /// Both identity fields are filled in
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.roll_number.is_empty() && !self.name.is_empty()
    }
}

/// Envelope returned by the schema endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormResponse {
    #[serde(default)]
    pub form: Option<FormSchema>,
}

/// A complete form: a title and its ordered sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub form_title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl FormSchema {
    /// Create a new schema without sections
    pub fn new(form_title: impl Into<String>) -> Self {
        Self {
            form_title: form_title.into(),
            sections: Vec::new(),
        }
    }

    /// Replace the sections
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Section at the given position
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Loaded, but has nothing to fill in
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All fields of all sections, in display order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Look up a field definition by id
    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&FieldDef> {
        self.fields().find(|f| f.field_id == field_id)
    }

    #[must_use]
    pub fn contains_field(&self, field_id: &str) -> bool {
        self.field(field_id).is_some()
    }

    /// Check that section ids and field ids are unique within the schema.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate section or field id found, in display order.
    pub fn check_integrity(&self) -> Result<()> {
        let mut section_ids = HashSet::new();
        let mut field_ids = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(section.section_id.as_str()) {
                return Err(Error::DuplicateSection {
                    section_id: section.section_id.clone(),
                });
            }
            for field in &section.fields {
                if !field_ids.insert(field.field_id.as_str()) {
                    return Err(Error::duplicate_field(&section.section_id, &field.field_id));
                }
            }
        }

        Ok(())
    }
}

/// A named, ordered group of fields navigated and validated as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(deserialize_with = "id_string")]
    pub section_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl Section {
    pub fn new(section_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            title: title.into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldDef>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }
}

/// Input widget kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Date,
    Textarea,
    Dropdown,
    Radio,
    Checkbox,
    /// A type this client does not know how to render
    #[serde(other)]
    Unsupported,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Unsupported => "unsupported",
        }
    }

    /// Choice among a fixed list of options
    #[must_use]
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option of a dropdown or radio field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            data_test_id: None,
        }
    }
}

/// Custom validation settings carried by a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Declarative definition of one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    #[serde(deserialize_with = "id_string")]
    pub field_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    /// Flat form of `validation.message`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

impl FieldDef {
    /// Create an optional field without constraints
    pub fn new(field_id: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field_id: field_id.into(),
            label: label.into(),
            field_type,
            required: false,
            placeholder: None,
            min_length: None,
            max_length: None,
            options: Vec::new(),
            validation: None,
            validation_message: None,
            data_test_id: None,
        }
    }

    /// Set required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set min length
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Set max length
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the message shown when a required value is missing
    #[must_use]
    pub fn validation_message(mut self, message: impl Into<String>) -> Self {
        self.validation = Some(FieldValidation {
            message: Some(message.into()),
        });
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    /// Custom required-field message, if the schema supplies one. The nested
    /// `validation.message` wins over a flat `validationMessage`.
    #[must_use]
    pub fn custom_message(&self) -> Option<&str> {
        self.validation
            .as_ref()
            .and_then(|v| v.message.as_deref())
            .or(self.validation_message.as_deref())
    }

    /// Find an option by its value or, failing that, its label
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&FieldOption> {
        self.options
            .iter()
            .find(|o| o.value == key)
            .or_else(|| self.options.iter().find(|o| o.label == key))
    }
}

/// Ids arrive as strings, but some services emit numeric ids
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_schema() -> FormSchema {
        FormSchema::new("Registration").with_sections(vec![
            Section::new("personal", "Personal").with_fields(vec![
                FieldDef::new("name", "Name", FieldType::Text).required(),
                FieldDef::new("dob", "Date of birth", FieldType::Date),
            ]),
            Section::new("contact", "Contact").with_fields(vec![
                FieldDef::new("email", "Email", FieldType::Email).required(),
            ]),
        ])
    }

    #[test]
    fn test_deserialize_service_field() {
        let json = r#"{
            "fieldId": "email",
            "type": "email",
            "label": "Email Address",
            "placeholder": "you@example.com",
            "required": true,
            "dataTestId": "email-input",
            "validation": { "message": "Email is required" },
            "maxLength": 50
        }"#;

        let field: FieldDef = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_id, "email");
        assert_eq!(field.field_type, FieldType::Email);
        assert!(field.required);
        assert_eq!(field.max_length, Some(50));
        assert_eq!(field.min_length, None);
        assert_eq!(field.custom_message(), Some("Email is required"));
        assert_eq!(field.data_test_id.as_deref(), Some("email-input"));
    }

    #[test]
    fn test_flat_validation_message() {
        let json = r#"{
            "fieldId": "name",
            "type": "text",
            "label": "Name",
            "required": true,
            "validationMessage": "Tell us your name"
        }"#;
        let field: FieldDef = serde_json::from_str(json).unwrap();
        assert_eq!(field.custom_message(), Some("Tell us your name"));

        let both = r#"{
            "fieldId": "name",
            "type": "text",
            "label": "Name",
            "validation": { "message": "Nested" },
            "validationMessage": "Flat"
        }"#;
        let field: FieldDef = serde_json::from_str(both).unwrap();
        assert_eq!(field.custom_message(), Some("Nested"));
    }

    #[test]
    fn test_unknown_field_type_is_unsupported() {
        let json = r#"{ "fieldId": "f1", "type": "slider", "label": "Volume" }"#;
        let field: FieldDef = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Unsupported);
        assert!(!field.required);
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let json = r#"{ "sectionId": 1, "title": "Basics", "fields": [
            { "fieldId": 7, "type": "text", "label": "Nickname" }
        ] }"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.section_id, "1");
        assert_eq!(section.fields[0].field_id, "7");
        assert_eq!(section.description, "");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User::new("22BCE1234", "Asha");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["rollNumber"], "22BCE1234");
        assert_eq!(json["name"], "Asha");
    }

    #[test]
    fn test_user_completeness() {
        assert!(User::new("22BCE1234", "Asha").is_complete());
        assert!(!User::new("", "Asha").is_complete());
        assert!(!User::new("22BCE1234", "").is_complete());
    }

    #[test]
    fn test_field_lookup() {
        let schema = contact_schema();
        assert_eq!(schema.section_count(), 2);
        assert!(schema.contains_field("email"));
        assert!(!schema.contains_field("phone"));
        assert_eq!(schema.field("dob").map(|f| f.field_type), Some(FieldType::Date));
        assert_eq!(schema.fields().count(), 3);
    }

    #[test]
    fn test_integrity_accepts_unique_ids() {
        assert!(contact_schema().check_integrity().is_ok());
    }

    #[test]
    fn test_integrity_rejects_duplicate_field_across_sections() {
        let mut schema = contact_schema();
        schema.sections[1]
            .fields
            .push(FieldDef::new("name", "Name again", FieldType::Text));

        match schema.check_integrity() {
            Err(Error::DuplicateField {
                section_id,
                field_id,
            }) => {
                assert_eq!(section_id, "contact");
                assert_eq!(field_id, "name");
            }
            other => panic!("expected duplicate field, got {other:?}"),
        }
    }

    #[test]
    fn test_integrity_rejects_duplicate_section() {
        let mut schema = contact_schema();
        schema.sections.push(Section::new("personal", "Personal again"));
        assert!(matches!(
            schema.check_integrity(),
            Err(Error::DuplicateSection { .. })
        ));
    }

    #[test]
    fn test_option_lookup_by_value_then_label() {
        let field = FieldDef::new("gender", "Gender", FieldType::Radio).with_options(vec![
            FieldOption::new("m", "Male"),
            FieldOption::new("f", "Female"),
        ]);
        assert_eq!(field.option("f").map(|o| o.label.as_str()), Some("Female"));
        assert_eq!(field.option("Male").map(|o| o.value.as_str()), Some("m"));
        assert!(field.option("x").is_none());
        assert!(field.field_type.has_options());
    }
}
