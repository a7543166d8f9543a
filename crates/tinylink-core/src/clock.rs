use jiff::{SignedDuration, Timestamp};
use std::sync::{Arc, Mutex, PoisonError};

/// Source of the current time for expiry decisions.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// store and advance the other.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            inner: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: SignedDuration) {
        let mut now = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Ok(next) = now.checked_add(by) {
            *now = next;
        }
    }

    pub fn set(&self, to: Timestamp) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
