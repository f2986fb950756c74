//! Deferred actions as cancellable timers keyed by region.
//!
//! Time is a `Duration` since the event loop started, supplied by the
//! caller, so the scheduler stays deterministic under test. Each key has
//! at most one pending deadline: scheduling it again replaces the old one.

use std::collections::BTreeMap;
use std::time::Duration;

/// The regions that own a deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKey {
    /// Clear the keypress highlight.
    KeyHighlight,
    /// Hide the success message and clear the form.
    FormReset,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: BTreeMap<TimerKey, Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `key` to fire `after` from `now`, replacing any pending deadline.
    pub fn schedule(&mut self, key: TimerKey, now: Duration, after: Duration) {
        self.pending.insert(key, now + after);
    }

    /// Disarm `key`. Returns whether it was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<TimerKey> {
        let mut due: Vec<(Duration, TimerKey)> = self
            .pending
            .iter()
            .filter(|&(_, &deadline)| deadline <= now)
            .map(|(&key, &deadline)| (deadline, key))
            .collect();
        due.sort();
        for (_, key) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
