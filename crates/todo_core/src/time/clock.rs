//! Injectable "now" source.

use chrono::{DateTime, Local, TimeZone};

/// Supplies the reference instant for date classification.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Reads the system clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always returns the same instant. Used for deterministic derivations.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    instant: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self { instant }
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.instant.clone()
    }
}
