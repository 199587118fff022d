use chrono::{DateTime, Local, NaiveDate, Utc};

use tally_core::Clock;

/// Real-time clock backed by the system time source.
///
/// Timestamps are UTC; the calendar day follows the local time zone, so month
/// and week windows turn over at local midnight.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
