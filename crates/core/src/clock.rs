//! Injectable time source.
//!
//! Ingestion ("created date is not in the future") and verification ("scanning
//! date is server-assigned") both depend on the current time. They read it
//! through this trait so the engines stay deterministic under test.

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall-clock time. The production implementation.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for tests/dev.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let instant = "2024-06-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let clock = FixedClock::at(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }
}
