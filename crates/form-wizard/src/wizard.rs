//! Wizard controller
//!
//! Ties a session to the service that supplies its schema and drives the
//! [`FormState`] state machine once the schema is loaded.

use crate::session::Session;
use crate::state::{Advance, FormState, Submission};
use crate::{Error, Result};
use form_client::FormService;
use form_schema::{FormSchema, FormValue};
use form_validation::SectionValidator;
use tracing::{info, warn};

/// Wizard for one session: not loaded until [`Wizard::load`] succeeds
pub struct Wizard<S> {
    service: S,
    session: Session,
    validator: SectionValidator,
    state: Option<FormState>,
}

impl<S: FormService> Wizard<S> {
    #[must_use]
    pub fn new(service: S, session: Session) -> Self {
        Self {
            service,
            session,
            validator: SectionValidator::new(),
            state: None,
        }
    }

    /// Use a specific section validator for every section
    #[must_use]
    pub fn with_validator(mut self, validator: SectionValidator) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Fetch the session's schema and start on its first section with empty
    /// values and errors. On failure the wizard state is left untouched.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Load`] when the service has no usable schema.
    pub async fn load(&mut self) -> Result<&FormSchema> {
        let fetched = self.service.fetch_form(self.session.roll_number()).await;

        match fetched {
            Ok(schema) => {
                info!(
                    roll_number = self.session.roll_number(),
                    title = %schema.form_title,
                    sections = schema.section_count(),
                    "form loaded"
                );
                let state = self
                    .state
                    .insert(FormState::with_validator(schema, self.validator.clone()));
                Ok(state.schema())
            }
            Err(e) => {
                warn!(roll_number = self.session.roll_number(), "Error loading form: {e}");
                Err(Error::Load(e))
            }
        }
    }

    /// Loaded state
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotLoaded`] before a successful load.
    pub fn state(&self) -> Result<&FormState> {
        self.state.as_ref().ok_or(Error::NotLoaded)
    }

    /// Loaded state, mutably
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotLoaded`] before a successful load.
    pub fn state_mut(&mut self) -> Result<&mut FormState> {
        self.state.as_mut().ok_or(Error::NotLoaded)
    }

    /// See [`FormState::set_value`].
    ///
    /// # Errors
    ///
    /// Fails when not loaded or when the field is unknown.
    pub fn set_value(&mut self, field_id: &str, value: impl Into<FormValue>) -> Result<()> {
        self.state_mut()?.set_value(field_id, value)
    }

    /// See [`FormState::next`].
    ///
    /// # Errors
    ///
    /// Fails when not loaded or when the form has no sections.
    pub fn next(&mut self) -> Result<Advance> {
        self.state_mut()?.next()
    }

    /// See [`FormState::prev`].
    ///
    /// # Errors
    ///
    /// Fails when not loaded.
    pub fn prev(&mut self) -> Result<usize> {
        Ok(self.state_mut()?.prev())
    }

    /// See [`FormState::submit`].
    ///
    /// # Errors
    ///
    /// Fails when not loaded or when the form has no sections.
    pub fn submit(&mut self) -> Result<Submission> {
        self.state_mut()?.submit()
    }

    /// Give up the wizard, keeping the loaded state if any
    #[must_use]
    pub fn into_state(self) -> Option<FormState> {
        self.state
    }
}
