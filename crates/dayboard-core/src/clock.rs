//! Wall-clock collaborator.
//!
//! Engine functions take time as a value; only callers that need "now"
//! go through a [`Clock`], so tests can pin it with [`FixedClock`].

use chrono::{Duration, Local, NaiveDateTime};

/// Source of the local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> chrono::NaiveDate {
        self.now().date()
    }
}

/// The system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant. Can be advanced by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn advance(&mut self, by: Duration) {
        self.0 += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Longest accepted refresh cadence, in seconds.
pub const MAX_REFRESH_SECS: u64 = 86_400;

/// Decides when the current-time marker is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteRefresh {
    cadence: Duration,
    last: Option<NaiveDateTime>,
}

impl Default for MinuteRefresh {
    fn default() -> Self {
        Self::new(60)
    }
}

impl MinuteRefresh {
    /// Refresh every `secs` seconds, clamped to `1..=MAX_REFRESH_SECS`.
    pub fn new(secs: u64) -> Self {
        let secs = secs.clamp(1, MAX_REFRESH_SECS) as i64;
        Self {
            cadence: Duration::try_seconds(secs).unwrap_or(Duration::minutes(1)),
            last: None,
        }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// True if nothing was rendered yet or a full cadence has elapsed.
    pub fn due(&self, now: NaiveDateTime) -> bool {
        match self.last {
            None => true,
            Some(last) => now - last >= self.cadence || now < last,
        }
    }

    /// Record a refresh at `now`.
    pub fn mark(&mut self, now: NaiveDateTime) {
        self.last = Some(now);
    }

    /// Mark and report whether a refresh was due.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        let due = self.due(now);
        if due {
            self.mark(now);
        }
        due
    }
}
