//! Login session

use crate::notice::Notice;
use crate::{Error, Result};
use form_client::FormService;
use form_schema::User;
use tracing::{info, warn};

/// The logged-in identity, fixed for the lifetime of a wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    /// Open a session without contacting the service.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingIdentity`] when the roll number or name is empty.
    pub fn new(user: User) -> Result<Self> {
        if !user.is_complete() {
            return Err(Error::MissingIdentity);
        }
        Ok(Self { user })
    }

    /// Check the identity, register it with the service and open a session.
    /// The returned notice carries the service's confirmation message.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingIdentity`] before any network call when the
    /// identity is incomplete, and with [`Error::Registration`] when the
    /// service cannot be reached or rejects the user.
    pub async fn login<S: FormService>(service: &S, user: User) -> Result<(Self, Notice)> {
        let session = Self::new(user)?;

        let message = service
            .register(&session.user)
            .await
            .inspect_err(|e| warn!(roll_number = %session.user.roll_number, "login failed: {e}"))
            .map_err(Error::Registration)?;

        info!(roll_number = %session.user.roll_number, "logged in");
        Ok((session, Notice::success(message)))
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn roll_number(&self) -> &str {
        &self.user.roll_number
    }
}
