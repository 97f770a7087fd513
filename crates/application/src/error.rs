//! Application error types

use folio_domain::DomainError;
use thiserror::Error;

use crate::ports::{ApiError, StorageError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A portfolio API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A preference storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The application could not be configured.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
