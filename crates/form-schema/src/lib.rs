#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # form-schema
//!
//! Form schema model, client-side value state, and schema loader.
//!
//! A [`FormSchema`] is the server-provided description of an ordered list of
//! sections, each holding an ordered list of field definitions. The
//! [`FormValues`] and [`FormErrors`] maps hold the user's input and the
//! currently active validation messages, keyed by field id.

pub mod loader;
pub mod model;
pub mod values;

pub use loader::SchemaLoader;
pub use model::{
    FieldDef, FieldOption, FieldType, FieldValidation, FormResponse, FormSchema, Section, User,
};
pub use values::{FormErrors, FormValue, FormValues};

use thiserror::Error;

/// Errors that can occur when working with form schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate section id '{section_id}'")]
    DuplicateSection { section_id: String },

    #[error("Duplicate field id '{field_id}' in section '{section_id}'")]
    DuplicateField {
        section_id: String,
        field_id: String,
    },

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a duplicate-field error with the section it was found in.
    pub fn duplicate_field(section_id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self::DuplicateField {
            section_id: section_id.into(),
            field_id: field_id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_field_error_names_section_and_field() {
        let error = Error::duplicate_field("contact", "email");
        assert_eq!(
            error.to_string(),
            "Duplicate field id 'email' in section 'contact'"
        );
    }

    #[test]
    fn io_error_converts_via_from() {
        let error = std::fs::read_to_string("/path/that/does/not/exist")
            .map_err(Error::from)
            .expect_err("read should fail");
        assert!(matches!(error, Error::Io(_)));
    }
}
