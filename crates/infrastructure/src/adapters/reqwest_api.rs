//! Portfolio REST client using reqwest.
//!
//! This adapter implements the `PortfolioApi` port against the portfolio
//! backend: three JSON reads and one JSON write, each bounded by the
//! configured timeout. Requests are never retried.

use async_trait::async_trait;
use folio_application::ports::{ApiError, PortfolioApi};
use folio_domain::{ContactAcknowledgement, ContactSubmission, MainInfo, ProfileInfo, ProjectEntry};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;

/// Portfolio API client implementation using reqwest.
pub struct ReqwestPortfolioApi {
    client: Client,
    config: ApiConfig,
}

impl ReqwestPortfolioApi {
    /// Creates a client for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("Folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.config
            .endpoint(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{e}: {path}")))
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.config.timeout().as_millis()).unwrap_or(u64::MAX)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let body = self.send(self.client.get(url)).await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("{path}: {e}")))
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let timeout_ms = self.timeout_ms();

        let response = builder
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| Self::map_error(e, timeout_ms))?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(e, timeout_ms))?
            .to_vec();

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }
        Ok(body)
    }

    /// Maps reqwest errors to the port's error taxonomy.
    fn map_error(error: reqwest::Error, timeout_ms: u64) -> ApiError {
        if error.is_timeout() {
            return ApiError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string());
            let message = error.to_string();
            if message.to_lowercase().contains("dns") || message.to_lowercase().contains("resolve")
            {
                return ApiError::Network(format!("Could not resolve host {host}: {message}"));
            }
            return ApiError::Network(format!("Could not connect to {host}: {message}"));
        }

        if error.is_decode() || error.is_body() {
            return ApiError::Decode(error.to_string());
        }

        if error.is_builder() {
            return ApiError::InvalidUrl(error.to_string());
        }

        ApiError::Network(error.to_string())
    }
}

/// Extracts a human-readable message from an error body.
///
/// The body is read as JSON and the first non-blank `message` or `error`
/// string wins.
fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

#[async_trait]
impl PortfolioApi for ReqwestPortfolioApi {
    async fn fetch_about(&self) -> Result<ProfileInfo, ApiError> {
        self.get_json("about").await
    }

    async fn fetch_main_info(&self) -> Result<MainInfo, ApiError> {
        self.get_json("main-info").await
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectEntry>, ApiError> {
        self.get_json("projects").await
    }

    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactAcknowledgement, ApiError> {
        let url = self.endpoint("contact")?;
        let body = self.send(self.client.post(url).json(submission)).await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ContactAcknowledgement::default());
        }
        let ack: ContactAcknowledgement = serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode(format!("contact: {e}")))?;

        if ack.success {
            Ok(ack)
        } else {
            Err(ApiError::Http {
                status: 200,
                message: ack.message.filter(|m| !m.trim().is_empty()),
            })
        }
    }
}
