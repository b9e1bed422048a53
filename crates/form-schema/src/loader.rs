//! Loads form schemas and saved values from local files

use crate::model::FormSchema;
use crate::values::FormValues;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, trace};

/// Accepts either the bare schema or the `{ "form": ... }` service envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaFile {
    Envelope { form: FormSchema },
    Bare(FormSchema),
}

impl From<SchemaFile> for FormSchema {
    fn from(file: SchemaFile) -> Self {
        match file {
            SchemaFile::Envelope { form } | SchemaFile::Bare(form) => form,
        }
    }
}

/// Loader for schema files
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a schema from a specific file path. `.yaml`/`.yml` files are read
    /// as YAML, everything else as JSON.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, malformed content, or duplicate ids.
    pub fn load_from_file(&self, path: &Path) -> Result<FormSchema> {
        trace!("Loading schema from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if is_yaml(path) {
            self.load_from_yaml(&content)
        } else {
            self.load_from_json(&content)
        }
    }

    /// Load a schema from JSON string
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or duplicate ids.
    pub fn load_from_json(&self, json: &str) -> Result<FormSchema> {
        let file: SchemaFile = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;
        Self::finish(file.into())
    }

    /// Load a schema from YAML string
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or duplicate ids.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<FormSchema> {
        let file: SchemaFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;
        Self::finish(file.into())
    }

    /// Load a saved field-id to value map from a JSON or YAML file
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or malformed content.
    pub fn load_values_from_file(&self, path: &Path) -> Result<FormValues> {
        trace!("Loading values from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if is_yaml(path) {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))
        }
    }

    fn finish(schema: FormSchema) -> Result<FormSchema> {
        schema.check_integrity()?;
        debug!(
            "Loaded schema '{}' with {} sections",
            schema.form_title,
            schema.section_count()
        );
        Ok(schema)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e == "yaml" || e == "yml")
}
