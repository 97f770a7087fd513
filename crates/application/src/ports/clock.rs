//! Clock port for banner expiry and the footer year

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Lets tests move time forward to observe banner auto-dismissal.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
