//! Portfolio API port

use async_trait::async_trait;
use folio_domain::{
    ContactAcknowledgement, ContactSubmission, MainInfo, ProfileInfo, ProjectEntry,
    RequestErrorKind,
};
use thiserror::Error;

/// Errors returned by the portfolio API.
///
/// Timeouts, transport failures and non-2xx answers are distinct so the
/// views can pick the right message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// DNS resolution, connection refused or another transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}", message_suffix(.message))]
    Http {
        /// Response status code.
        status: u16,
        /// Message from the error body, when the server sent one.
        message: Option<String>,
    },

    /// The response body did not match the expected payload.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Maps the error onto the category used for display.
    #[must_use]
    pub const fn kind(&self) -> RequestErrorKind {
        match self {
            Self::Timeout { .. } => RequestErrorKind::Timeout,
            Self::Network(_) => RequestErrorKind::Network,
            Self::Http { .. } => RequestErrorKind::Http,
            Self::Decode(_) => RequestErrorKind::Decode,
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
        }
    }

    /// Returns the server-provided message of an HTTP error.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Port for the portfolio REST API.
///
/// Implementations enforce a request timeout and perform no retries.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    /// `GET /about`: the full profile.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, transport failure, non-2xx status or
    /// an undecodable body.
    async fn fetch_about(&self) -> Result<ProfileInfo, ApiError>;

    /// `GET /main-info`: the headline subset of the profile.
    ///
    /// # Errors
    ///
    /// Same as [`PortfolioApi::fetch_about`].
    async fn fetch_main_info(&self) -> Result<MainInfo, ApiError>;

    /// `GET /projects`: projects in server order.
    ///
    /// # Errors
    ///
    /// Same as [`PortfolioApi::fetch_about`].
    async fn fetch_projects(&self) -> Result<Vec<ProjectEntry>, ApiError>;

    /// `POST /contact`: sends a contact message.
    ///
    /// # Errors
    ///
    /// Same as [`PortfolioApi::fetch_about`]; `Http` carries the server's
    /// error message when present.
    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactAcknowledgement, ApiError>;
}
