//! Deferred callbacks ordered by due time.
//!
//! Timers are plain data; the board interprets them when they come due. A
//! timer whose target no longer exists fires as a no-op.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};

use crate::models::NotificationId;
use crate::simulation::{ConnectionStatus, Trigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Timer {
    ExpireNotification(NotificationId),
    /// Next step of the scripted reconnect sequence.
    Reconnect(ConnectionStatus),
    Simulation(Trigger),
}

#[derive(Debug, Default)]
pub struct Scheduler {
    // seq keeps timers with equal due times in insertion order
    queue: BinaryHeap<Reverse<(DateTime<Utc>, u64, Timer)>>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: DateTime<Utc>, timer: Timer) {
        self.seq += 1;
        self.queue.push(Reverse((at, self.seq, timer)));
    }

    /// Pops the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, Timer)> {
        match self.queue.peek() {
            Some(Reverse((at, _, _))) if *at <= now => {
                self.queue.pop().map(|Reverse((at, _, timer))| (at, timer))
            }
            _ => None,
        }
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.queue.peek().map(|Reverse((at, _, _))| *at)
    }

    /// Drops every pending timer matching the predicate.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&Timer) -> bool) {
        self.queue.retain(|Reverse((_, _, timer))| !predicate(timer));
    }
}
