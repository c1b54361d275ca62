//! Clock implementations for the time extension
//!
//! `now()`, relative date text ("tomorrow", "3 days ago") and duration
//! display all read the current moment through a `Clock`, so tests can pin it.

use jiff::Timestamp;
use parking_lot::RwLock;

use tcf_core::{Duration, Instant, TcfResult};

/// Source of the current moment
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from_timestamp(Timestamp::now())
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    value: RwLock<Instant>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        ManualClock {
            value: RwLock::new(start),
        }
    }

    /// Jump to a specific moment
    pub fn set(&self, instant: Instant) {
        *self.value.write() = instant;
    }

    /// Move forward (or backward, for a negative span)
    pub fn advance(&self, by: Duration) -> TcfResult<Instant> {
        let mut value = self.value.write();
        *value = value.checked_add(by)?;
        Ok(*value)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.value.read()
    }
}
