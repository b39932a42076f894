use std::sync::{Arc, RwLock};

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Clock abstracts access to the local wall-clock time so services remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current local day. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn hour(&self) -> u32 {
        self.now().hour()
    }
}

/// Real-time clock backed by the system's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Arc<RwLock<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            at: Arc::new(RwLock::new(at)),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        let mut guard = self.at.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = at;
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.at.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
