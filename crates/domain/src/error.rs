//! Domain error types

use thiserror::Error;

use crate::contact::ContactField;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required contact form field was left blank.
    #[error("{0} is required")]
    MissingField(ContactField),

    /// The email address does not look like an address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A stored theme value is neither `light` nor `dark`.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// A path does not match any page of the site.
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
