//! Client configuration options

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Address of the hosted form service
pub const DEFAULT_BASE_URL: &str = "https://dynamic-form-generator-9rl7.onrender.com";

/// Configuration for the form service client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service base address (default: the hosted service)
    pub base_url: String,
    /// Whole-request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("formwiz/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration file. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;

        let is_yaml = path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml");

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("YAML parse error: {e}")))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("JSON parse error: {e}")))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL without trailing slashes
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check the values make sense
    ///
    /// # Errors
    ///
    /// Fails on an empty or non-HTTP base URL, or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let base = self.normalized_base_url();
        if base.is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got '{base}'"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("formwiz/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_and_normalization() {
        let config = ClientConfig::new()
            .base_url("http://localhost:8080//")
            .timeout_secs(5);
        assert_eq!(config.normalized_base_url(), "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::new().base_url("").validate().is_err());
        assert!(ClientConfig::new().base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::new().timeout_secs(0).validate().is_err());
    }

    #[test]
    fn test_yaml_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "base_url: http://127.0.0.1:9000").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "timeout_secs": 3 }}"#).unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = ClientConfig::from_file(Path::new("/no/such/formwiz.yaml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
