//! Clock abstraction so freshness checks are testable

use chrono::{NaiveDate, Utc};

/// Source of the current UTC calendar date. Injected into the snapshot
/// store so tests can pin the freshness boundary.
pub trait Clock: Send + Sync {
    fn today_utc(&self) -> NaiveDate;
}

/// Wall-clock implementation used outside tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today_utc(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
