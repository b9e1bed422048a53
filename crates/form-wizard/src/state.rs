//! Wizard state machine over a loaded schema
//!
//! Holds the active section index, the field values and the active field
//! errors. Every transition that moves the active section replaces the error
//! map wholesale; editing a value only clears that field's error.

use crate::notice::Notice;
use crate::{Error, Result};
use form_schema::{FormErrors, FormSchema, FormValue, FormValues, Section};
use form_validation::SectionValidator;
use tracing::{debug, info, trace};

/// Result of trying to move to the next section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The section passed and the wizard moved forward
    Moved { from: usize, to: usize },
    /// The section passed but it is already the last one
    AtLastSection(usize),
    /// The section failed; the error map holds its failing fields
    Blocked { index: usize, failing: usize },
}

/// Result of submitting the whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The active section failed; nothing else was checked
    CurrentSectionInvalid { failing: usize },
    /// Another section failed and became the active one
    SectionIncomplete { index: usize, title: String },
    /// Every section passed
    Complete(FormValues),
}

impl Submission {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Submission::Complete(_))
    }

    /// Notification to show, if any. Failures of the active section are
    /// only shown inline.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Submission::CurrentSectionInvalid { .. } => None,
            Submission::SectionIncomplete { title, .. } => Some(Notice::error(format!(
                "Please complete the \"{title}\" section"
            ))),
            Submission::Complete(_) => Some(Notice::success("Form submitted successfully!")),
        }
    }
}

/// One entry of the progress indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 0-based position
    pub index: usize,
    pub section_id: String,
    pub title: String,
    pub active: bool,
}

/// Navigation and validation state for one loaded schema
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    current: usize,
    values: FormValues,
    errors: FormErrors,
    validator: SectionValidator,
}

impl FormState {
    /// Start on the first section with no values and no errors
    #[must_use]
    pub fn new(schema: FormSchema) -> Self {
        Self::with_validator(schema, SectionValidator::new())
    }

    /// Create with a specific section validator
    #[must_use]
    pub fn with_validator(schema: FormSchema, validator: SectionValidator) -> Self {
        Self {
            schema,
            current: 0,
            values: FormValues::new(),
            errors: FormErrors::new(),
            validator,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// 0-based index of the active section
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active section; `None` only for a schema without sections
    #[must_use]
    pub fn current_section(&self) -> Option<&Section> {
        self.schema.section(self.current)
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        let count = self.schema.section_count();
        count > 0 && self.current == count - 1
    }

    /// Progress indicator entries, one per section
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.schema
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| Step {
                index,
                section_id: section.section_id.clone(),
                title: section.title.clone(),
                active: index == self.current,
            })
            .collect()
    }

    /// Store a value and clear that field's error without revalidating.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownField`] when the schema has no such field;
    /// nothing is stored in that case.
    pub fn set_value(&mut self, field_id: &str, value: impl Into<FormValue>) -> Result<()> {
        if !self.schema.contains_field(field_id) {
            return Err(Error::unknown_field(field_id));
        }

        self.values.set(field_id, value);
        if self.errors.remove(field_id).is_some() {
            trace!(field = field_id, "cleared field error");
        }
        Ok(())
    }

    /// Store several values at once. Either all are stored or none.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownField`] on the first id the schema does not know.
    pub fn set_values(&mut self, values: FormValues) -> Result<()> {
        if let Some(unknown) = values.field_ids().find(|id| !self.schema.contains_field(id)) {
            return Err(Error::unknown_field(unknown));
        }
        for (field_id, value) in values.iter() {
            self.set_value(field_id, value.clone())?;
        }
        Ok(())
    }

    /// Validate the active section and move forward if it passes.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyForm`] when the schema has no sections.
    pub fn next(&mut self) -> Result<Advance> {
        let section = self
            .schema
            .sections
            .get(self.current)
            .ok_or(Error::EmptyForm)?;
        let report = self.validator.validate(section, &self.values);
        let valid = report.is_valid();
        self.errors = report.into_errors();

        if !valid {
            debug!(
                index = self.current,
                failing = self.errors.len(),
                "section blocked navigation"
            );
            return Ok(Advance::Blocked {
                index: self.current,
                failing: self.errors.len(),
            });
        }

        let last = self.schema.section_count() - 1;
        if self.current >= last {
            return Ok(Advance::AtLastSection(self.current));
        }

        let from = self.current;
        self.current += 1;
        info!(from, to = self.current, "moved to next section");
        Ok(Advance::Moved {
            from,
            to: self.current,
        })
    }

    /// Move back one section without validating. Errors are left as they are.
    pub fn prev(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        debug!(index = self.current, "moved to previous section");
        self.current
    }

    /// Validate the active section, then every other section in order,
    /// stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyForm`] when the schema has no sections.
    pub fn submit(&mut self) -> Result<Submission> {
        let section = self
            .schema
            .sections
            .get(self.current)
            .ok_or(Error::EmptyForm)?;
        let report = self.validator.validate(section, &self.values);
        let valid = report.is_valid();
        self.errors = report.into_errors();

        if !valid {
            return Ok(Submission::CurrentSectionInvalid {
                failing: self.errors.len(),
            });
        }

        let active = self.current;
        for (index, section) in self.schema.sections.iter().enumerate() {
            if index == active {
                continue;
            }

            let report = self.validator.validate(section, &self.values);
            let valid = report.is_valid();
            self.errors = report.into_errors();

            if !valid {
                self.current = index;
                info!(
                    index,
                    section = %section.section_id,
                    "submission stopped at incomplete section"
                );
                return Ok(Submission::SectionIncomplete {
                    index,
                    title: section.title.clone(),
                });
            }
        }

        info!(values = ?self.values, "form submitted");
        Ok(Submission::Complete(self.values.clone()))
    }
}
