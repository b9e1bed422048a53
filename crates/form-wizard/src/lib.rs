#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # form-wizard
//!
//! Multi-section form wizard: login session, schema loading, per-section
//! navigation with validation, and whole-form submission.
//!
//! The [`FormState`] state machine works on an already loaded schema and is
//! usable on its own. [`Wizard`] wraps it with a [`Session`] and a
//! [`FormService`](form_client::FormService) that supplies the schema.

pub mod notice;
pub mod session;
pub mod state;
pub mod wizard;

pub use notice::{Notice, NoticeLevel};
pub use session::Session;
pub use state::{Advance, FormState, Step, Submission};
pub use wizard::Wizard;

use thiserror::Error;

/// Message shown when the login identity is incomplete
pub const MISSING_IDENTITY_MESSAGE: &str = "Please fill in all fields";
/// Message shown when no schema could be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load form data";

/// Errors that can occur while driving the wizard
#[derive(Error, Debug)]
pub enum Error {
    #[error("Please fill in all fields")]
    MissingIdentity,

    #[error("{0}")]
    Registration(#[source] form_client::Error),

    #[error("Failed to load form data: {0}")]
    Load(#[source] form_client::Error),

    #[error("No form has been loaded")]
    NotLoaded,

    #[error("The form has no sections")]
    EmptyForm,

    #[error("Unknown field '{field_id}'")]
    UnknownField { field_id: String },
}

impl Error {
    #[must_use]
    pub fn unknown_field(field_id: impl Into<String>) -> Self {
        Self::UnknownField {
            field_id: field_id.into(),
        }
    }

    /// User-facing notification for this error
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Error::Load(_) => Notice::error(LOAD_FAILED_MESSAGE),
            other => Notice::error(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
