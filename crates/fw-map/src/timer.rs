//! Delayed-callback seam and a deterministic implementation.
//!
//! The adapter never sleeps.  It asks a [`TimerQueue`] for a [`TimerId`] and
//! expects the host to call `MapAdapter::on_timer(id)` once the delay has
//! passed.  A cancelled or superseded id may still be delivered by a host
//! that raced the cancel; the adapter ignores ids it is not waiting for.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

pub trait TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel `id`.  Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Timer queue driven by explicit [`advance`](ManualTimers::advance) calls.
///
/// Pending timers are ordered by `(deadline, id)`, so timers due at the same
/// instant fire in scheduling order.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now:     Duration,
    next_id: u64,
    due:     BTreeSet<(Duration, TimerId)>,
    /// Reverse index for O(log n) cancel.
    by_id:   BTreeMap<TimerId, Duration>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move virtual time forward by `by` and return every timer that came
    /// due, earliest first.  Returned timers are no longer pending.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now = self.now.saturating_add(by);
        let mut fired = Vec::new();
        while let Some(&(deadline, id)) = self.due.first() {
            if deadline > self.now {
                break;
            }
            self.due.pop_first();
            self.by_id.remove(&id);
            fired.push(id);
        }
        fired
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl TimerQueue for ManualTimers {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = self.now.saturating_add(delay);
        self.due.insert((deadline, id));
        self.by_id.insert(id, deadline);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(deadline) = self.by_id.remove(&id) {
            self.due.remove(&(deadline, id));
        }
    }
}
