//! Time sources.
//!
//! The store never reads the wall clock directly, so "today" can be pinned
//! in tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, NaiveDate, SubsecRound, Utc};

pub trait Clock {
    /// Current instant, at millisecond precision.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date used for status derivation.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" is the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        FixedClock {
            now: Mutex::new(now.trunc_subsecs(3)),
        }
    }

    /// A clock pinned to noon (UTC) on the given date.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self::new(noon)
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_on_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_fixed_clock_advance_crosses_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let clock = FixedClock::on(date);
        clock.advance(Duration::hours(13));
        assert_eq!(clock.today(), date.succ_opt().unwrap());
    }

    #[test]
    fn test_system_clock_has_millisecond_precision() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
