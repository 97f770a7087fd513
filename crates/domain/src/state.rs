//! Request lifecycle state for data-bound views.
//!
//! This module defines the state machine every view walks through while
//! loading its content, enabling the UI to display appropriate feedback
//! at each stage.

use serde::{Deserialize, Serialize};

/// Message shown when a load timed out.
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please check your connection and try again.";

/// Message shown for every other load failure.
pub const GENERIC_LOAD_MESSAGE: &str = "Failed to load content. Please try again later.";

/// Represents the current state of one asynchronous fetch.
///
/// - `Idle`: nothing requested yet
/// - `Loading`: fetch in flight, show loading indicator
/// - `Success`: payload received, render content
/// - `Error`: fetch failed, show error message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    /// No request has been issued for this mount yet.
    #[default]
    Idle,

    /// Request is in progress.
    Loading,

    /// Request completed successfully.
    Success(T),

    /// Request failed with an error.
    Error {
        /// Error category for display.
        kind: RequestErrorKind,
        /// Human-readable error message.
        message: String,
    },
}

impl<T> RequestState<T> {
    /// Creates a new Loading state.
    #[must_use]
    pub const fn loading() -> Self {
        Self::Loading
    }

    /// Creates an Error state.
    #[must_use]
    pub fn error(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    /// Creates an Error state carrying the user-facing load message for `kind`.
    #[must_use]
    pub fn failed(kind: RequestErrorKind) -> Self {
        Self::error(kind, kind.load_message())
    }

    /// Returns true if the state is Idle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a request is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the last request succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if the last request failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the payload if in Success state.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the error message if in Error state.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Categories of request errors for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// Request did not complete within the timeout.
    Timeout,

    /// DNS, connection refused or another transport failure.
    Network,

    /// The server answered with a non-2xx status.
    Http,

    /// The response body could not be decoded.
    Decode,

    /// The configured base URL or endpoint is malformed.
    InvalidUrl,
}

impl RequestErrorKind {
    /// Returns the message shown in place of content when a load fails.
    #[must_use]
    pub const fn load_message(self) -> &'static str {
        match self {
            Self::Timeout => TIMEOUT_MESSAGE,
            Self::Network | Self::Http | Self::Decode | Self::InvalidUrl => GENERIC_LOAD_MESSAGE,
        }
    }
}
