//! System clock adapter

use chrono::{DateTime, Utc};
use folio_application::ports::Clock;

/// Wall clock used for banner expiry and the footer year.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn footer_year_is_current() {
        assert!(SystemClock::new().now().year() >= 2024);
    }
}
