//! Folio Application - Ports, stores and view lifecycles
//!
//! This crate defines the application layer with:
//! - Port traits (portfolio API, preference storage, OS colour scheme, clock)
//! - The process-wide theme store
//! - The fetch-on-mount lifecycle shared by the data-bound pages
//! - The contact form submission state machine
//! - The navigation shell composing header, routed page and footer

pub mod contact;
pub mod error;
pub mod lifecycle;
pub mod ports;
pub mod render;
pub mod shell;
pub mod theme;

pub use contact::{Banner, BannerKind, ContactForm, FormPhase, SubmitError};
pub use error::{ApplicationError, ApplicationResult};
pub use lifecycle::{DataView, MountToken, ViewSlot};
pub use ports::{
    ApiError, Clock, ColorSchemeSource, PortfolioApi, PreferenceStorage, SchemeListener,
    SchemeWatch, StorageError,
};
pub use render::{Block, HeaderView, Page, Rendered};
pub use shell::Shell;
pub use theme::{Subscription, ThemeStore};
