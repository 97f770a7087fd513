//! Folio Domain - Core portfolio types
//!
//! This crate defines the domain model for the Folio portfolio client:
//! the profile and project payloads served by the portfolio API, the
//! contact submission, the light/dark preference and the request
//! lifecycle tag that drives every data-bound view.
//! All types here are pure Rust with no I/O dependencies.

pub mod contact;
pub mod error;
pub mod navigation;
pub mod profile;
pub mod project;
pub mod state;
pub mod theme;

pub use contact::{ContactAcknowledgement, ContactField, ContactSubmission};
pub use error::{DomainError, DomainResult};
pub use navigation::{NavigationState, Route, SCROLL_THRESHOLD};
pub use profile::{ContactLinks, MainInfo, ProfileInfo};
pub use project::ProjectEntry;
pub use state::{GENERIC_LOAD_MESSAGE, RequestErrorKind, RequestState, TIMEOUT_MESSAGE};
pub use theme::{THEME_STORAGE_KEY, ThemePreference, ThemeTokens};
