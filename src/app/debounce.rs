// LogLens - app/debounce.rs
//
// Single-slot cancellable deferred action.
//
// At most one value is pending; each `schedule` supersedes the previous one
// and restarts the quiet period. Nothing runs on its own: the host frame loop
// calls `poll` with the current instant and acts on whatever comes back.
// Time is passed in so behaviour is deterministic under test.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Holds at most one pending value until its quiet period elapses.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value` to fire `delay` after `now`, replacing any pending
    /// value. Returns true if a pending value was superseded.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
        superseded
    }

    /// Drop the pending value, if any, and return it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Whether a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let elapsed = self.pending.as_ref().is_some_and(|p| now >= p.due);
        if elapsed {
            self.cancel()
        } else {
            None
        }
    }

    /// Time remaining until the pending value is due, for repaint scheduling.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        assert!(!d.schedule("a", t0));
        assert_eq!(d.poll(t0 + Duration::from_millis(499)), None);
        assert_eq!(d.poll(t0 + DELAY), Some("a"));
        assert_eq!(d.poll(t0 + DELAY * 2), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_reschedule_supersedes_and_restarts_timer() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule("first", t0);
        let t1 = t0 + Duration::from_millis(300);
        assert!(d.schedule("second", t1));
        // The first deadline passes without anything firing.
        assert_eq!(d.poll(t0 + DELAY), None);
        assert_eq!(d.poll(t1 + DELAY), Some("second"));
    }

    #[test]
    fn test_cancel_returns_pending_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule(7, t0);
        assert_eq!(d.cancel(), Some(7));
        assert_eq!(d.poll(t0 + DELAY), None);
        assert_eq!(d.cancel(), None);
    }

    #[test]
    fn test_time_until_due() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        assert_eq!(d.time_until_due(t0), None);
        d.schedule((), t0);
        assert_eq!(
            d.time_until_due(t0 + Duration::from_millis(200)),
            Some(Duration::from_millis(300))
        );
        assert_eq!(d.time_until_due(t0 + DELAY * 3), Some(Duration::ZERO));
    }
}
