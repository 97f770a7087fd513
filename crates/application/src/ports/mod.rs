//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod color_scheme;
mod portfolio_api;
mod preference_storage;

pub use clock::Clock;
pub use color_scheme::{ColorSchemeSource, SchemeListener, SchemeWatch};
pub use portfolio_api::{ApiError, PortfolioApi};
pub use preference_storage::{PreferenceStorage, StorageError};
