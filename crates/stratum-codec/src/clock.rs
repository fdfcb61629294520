//! Wall-clock abstraction for record timestamps.
//!
//! When a group has no timestamp property, the codec stamps records with the
//! current time. Encoding is otherwise a pure function of the schema and the
//! element, so the clock is injected: production code uses [`SystemClock`]
//! and tests use [`FixedClock`] to make encoded records deterministic.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the millisecond timestamps stamped onto encoded records.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        i64::try_from(since_epoch.as_millis()).unwrap_or(i64::MAX)
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic_enough() {
        let a = SystemClock.now_millis();
        let b = SystemClock.now_millis();
        assert!(a > 0);
        assert!(b >= a);
    }

    #[test]
    fn fixed_clock_reports_its_instant() {
        assert_eq!(FixedClock(1_234).now_millis(), 1_234);
        assert_eq!(FixedClock(-5).now_millis(), -5);
    }
}
