/// Wall-clock capability behind a trait so relative bounds and the
/// default initial selection can be tested against a manual clock

use std::sync::Mutex;

use chrono::Timelike;

use crate::time::ClockTime;

/// Source of the current hour/minute
pub trait Clock: Send + Sync {
    fn now(&self) -> ClockTime;
}

/// Production clock reading local wall-clock time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ClockTime {
        let now = chrono::Local::now();
        ClockTime::new(now.hour() as u8, now.minute() as u8)
    }
}

/// Manually-driven clock for tests and demos
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<ClockTime>,
}

impl ManualClock {
    pub fn new(current: ClockTime) -> Self {
        Self {
            current: Mutex::new(current),
        }
    }

    /// Move the clock to a new time; the next resolution observes it
    pub fn set(&self, t: ClockTime) {
        if let Ok(mut current) = self.current.lock() {
            *current = t;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> ClockTime {
        self.current
            .lock()
            .map(|t| *t)
            .unwrap_or(ClockTime { hour: 0, minute: 0 })
    }
}
