#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # form-client
//!
//! HTTP client for the user registration and form schema service.
//!
//! The service exposes two calls: `POST /create-user` registers an identity
//! and `GET /get-form?rollNumber=<id>` returns the form schema for it. Every
//! failure (network, non-2xx status, unreadable body) surfaces as an
//! [`Error`]; callers never see a partially decoded schema.

pub mod client;
pub mod config;

pub use client::{FormService, SchemaClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};

use thiserror::Error;

/// Errors that can occur when talking to the form service
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The service answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body could not be read as expected
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The decoded schema is not usable
    #[error("Invalid form schema: {0}")]
    InvalidSchema(#[from] form_schema::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a transport error for a request URL.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Build a rejection error from a response status.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Build a decode error for a response URL.
    #[must_use]
    pub fn decode(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// HTTP status of a rejected request
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
