//! Debounce + distinct filter for a single field.
//!
//! Pure state machine: the caller feeds values with [`Debouncer::push`] and
//! asks for a commit with [`Debouncer::fire`] once the returned deadline has
//! passed. Timers live in [`super::pipeline`].

use std::time::Duration;
use tokio::time::Instant;

/// Per-field debounce state.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    /// Latest value not yet past the quiet period
    pending: Option<String>,
    pending_since: Option<Instant>,
    /// Last value that passed both stages
    last_committed: Option<String>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            pending_since: None,
            last_committed: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a keystroke value and restart the quiet period.
    ///
    /// Returns the instant at which the value may be committed.
    pub fn push(&mut self, value: impl Into<String>, now: Instant) -> Instant {
        self.pending = Some(value.into());
        self.pending_since = Some(now);
        now + self.quiet
    }

    /// Deadline of the pending value, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending_since.map(|since| since + self.quiet)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet period has elapsed.
    ///
    /// Returns `None` when nothing is pending, the deadline has not been
    /// reached, or the value equals the last committed one.
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.pending_since = None;
        let value = self.pending.take()?;
        if self.last_committed.as_deref() == Some(value.as_str()) {
            return None;
        }
        self.last_committed = Some(value.clone());
        Some(value)
    }

    /// Drop the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.pending_since = None;
    }

    pub fn last_committed(&self) -> Option<&str> {
        self.last_committed.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(750);

    #[test]
    fn test_burst_commits_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("a", start);
        debouncer.push("ab", start + Duration::from_millis(100));
        let deadline = debouncer.push("abc", start + Duration::from_millis(200));

        assert_eq!(deadline, start + Duration::from_millis(950));
        assert_eq!(debouncer.fire(start + Duration::from_millis(900)), None);
        assert_eq!(debouncer.fire(deadline), Some("abc".to_string()));
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_fire_before_deadline_keeps_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("x", start);
        assert_eq!(debouncer.fire(start + Duration::from_millis(749)), None);
        assert!(debouncer.has_pending());
    }

    #[test]
    fn test_distinct_filter() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        let first = debouncer.push("same", start);
        assert_eq!(debouncer.fire(first), Some("same".to_string()));

        let second = debouncer.push("same", first + Duration::from_secs(1));
        assert_eq!(debouncer.fire(second), None);
        assert_eq!(debouncer.last_committed(), Some("same"));

        // A different value in between lets the old one through again
        let third = debouncer.push("other", second);
        assert_eq!(debouncer.fire(third), Some("other".to_string()));
        let fourth = debouncer.push("same", third);
        assert_eq!(debouncer.fire(fourth), Some("same".to_string()));
    }

    #[test]
    fn test_intermediate_value_equal_to_committed_is_not_special() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        let t = debouncer.push("a", start);
        debouncer.fire(t);

        // "a" -> "ab" -> "a" within one window stabilizes at "a": suppressed
        debouncer.push("ab", t);
        let t = debouncer.push("a", t + Duration::from_millis(10));
        assert_eq!(debouncer.fire(t), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("draft", start);
        debouncer.cancel();
        assert!(debouncer.deadline().is_none());
        assert_eq!(debouncer.fire(start + QUIET * 2), None);
        assert_eq!(debouncer.last_committed(), None);
    }
}
