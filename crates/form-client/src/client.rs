//! Form service API client
//!
//! REST wrapper for the registration and schema endpoints.

use crate::config::ClientConfig;
use crate::{Error, Result};
use form_schema::{FormResponse, FormSchema, User};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

const CREATE_USER_PATH: &str = "/create-user";
const GET_FORM_PATH: &str = "/get-form";

const REGISTERED_MESSAGE: &str = "User created successfully";
const REGISTER_FAILED_MESSAGE: &str = "Failed to create user";
const FETCH_FAILED_MESSAGE: &str = "Failed to fetch form";

/// Source of user registration and form schemas.
///
/// [`SchemaClient`] is the HTTP implementation; the wizard only depends on
/// this trait.
pub trait FormService {
    /// Register an identity, returning the service's confirmation message
    fn register(&self, user: &User) -> impl Future<Output = Result<String>> + Send;

    /// Fetch the form schema for a roll number
    fn fetch_form(&self, roll_number: &str) -> impl Future<Output = Result<FormSchema>> + Send;
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

impl MessageBody {
    fn into_message(self) -> Option<String> {
        self.message.filter(|m| !m.is_empty())
    }
}

/// HTTP client for the form service
#[derive(Debug, Clone)]
pub struct SchemaClient {
    /// API base URL, without trailing slash
    base_url: String,
    http: Client,
}

impl SchemaClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            http,
        })
    }

    /// Create a client for the hosted service
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ClientConfig::default())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /create-user` with the identity as JSON body
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx responses (carrying the service's
    /// message), and unreadable success bodies.
    pub async fn create_user(&self, user: &User) -> Result<String> {
        let url = self.url(CREATE_USER_PATH);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(user)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))
            .inspect_err(|e| warn!("Error creating user: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageBody>(&body)
                .ok()
                .and_then(MessageBody::into_message)
                .unwrap_or_else(|| REGISTER_FAILED_MESSAGE.to_string());
            warn!(status = status.as_u16(), "Error creating user: {message}");
            return Err(Error::rejected(status.as_u16(), message));
        }

        let parsed: MessageBody = serde_json::from_str(&body)
            .map_err(|e| Error::decode(&url, e))
            .inspect_err(|e| warn!("Error creating user: {e}"))?;

        let message = parsed
            .into_message()
            .unwrap_or_else(|| REGISTERED_MESSAGE.to_string());
        info!(roll_number = %user.roll_number, "user registered");
        Ok(message)
    }

    /// `GET /get-form?rollNumber=<id>`
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx responses, bodies without a form,
    /// and schemas with duplicate ids. An empty but present form is returned
    /// as-is.
    pub async fn get_form(&self, roll_number: &str) -> Result<FormSchema> {
        let url = self.url(GET_FORM_PATH);
        debug!("GET {}?rollNumber={}", url, roll_number);

        let response = self
            .http
            .get(&url)
            .query(&[("rollNumber", roll_number)])
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))
            .inspect_err(|e| warn!("Error fetching form: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Error fetching form: {FETCH_FAILED_MESSAGE}");
            return Err(Error::rejected(status.as_u16(), FETCH_FAILED_MESSAGE));
        }

        let body: FormResponse = response
            .json()
            .await
            .map_err(|e| Error::decode(&url, e))
            .inspect_err(|e| warn!("Error fetching form: {e}"))?;

        let schema = body
            .form
            .ok_or_else(|| Error::decode(&url, "response has no form"))?;
        schema.check_integrity()?;

        info!(
            roll_number,
            title = %schema.form_title,
            sections = schema.section_count(),
            "form fetched"
        );
        Ok(schema)
    }
}

impl FormService for SchemaClient {
    async fn register(&self, user: &User) -> Result<String> {
        self.create_user(user).await
    }

    async fn fetch_form(&self, roll_number: &str) -> Result<FormSchema> {
        self.get_form(roll_number).await
    }
}
