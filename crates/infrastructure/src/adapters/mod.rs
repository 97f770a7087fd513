//! Adapters for the application ports.

mod color_scheme;
mod reqwest_api;
mod system_clock;

pub use color_scheme::{COLOR_SCHEME_VAR, SystemColorScheme};
pub use reqwest_api::ReqwestPortfolioApi;
pub use system_clock::SystemClock;
