//! Time source for index timestamps

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Something that can tell the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic timestamps
#[derive(Debug)]
pub struct FixedClock {
    base: DateTime<Utc>,
    elapsed_ms: AtomicI64,
}

impl FixedClock {
    #[must_use]
    pub fn new(base: DateTime<Utc>) -> Self {
        Self {
            base,
            elapsed_ms: AtomicI64::new(0),
        }
    }

    /// Move the clock forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.elapsed_ms.fetch_add(millis, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = self.elapsed_ms.load(Ordering::Relaxed);
        self.base + chrono::Duration::milliseconds(elapsed)
    }
}

/// Render a timestamp the way `index.yaml` stores it: RFC 3339, UTC, milliseconds
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_millis() {
        let time = Utc.with_ymd_and_hms(2001, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&time), "2001-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        clock.advance(Duration::from_millis(1500));
        assert_eq!(format_timestamp(&clock.now()), "2024-05-01T00:00:01.500Z");
    }
}
