//! Virtual-time timer queue.
//!
//! Timers are ordered by due time, ties broken by insertion order. Nothing in
//! here reads a wall clock: the owner moves time forward with
//! [`TimerQueue::pop_due`] and [`TimerQueue::advance_to`], which keeps every
//! timed behaviour testable without real delays.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::api::types::Millis;

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    due: Millis,
    seq: u64,
}

// BinaryHeap is a max-heap; invert so the earliest slot is on top.
impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending one-shot timers carrying a task payload `T`.
/// Recurring behaviour is built by rescheduling from the fired task.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    slots: BinaryHeap<Slot>,
    /// Live tasks by sequence number. Cancelled timers leave a stale slot
    /// in the heap that is skipped when it surfaces.
    tasks: HashMap<u64, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Millis::ZERO,
            slots: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule `task` at an absolute time. Times in the past fire on the next pop.
    pub fn schedule_at(&mut self, due: Millis, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.push(Slot { due, seq });
        self.tasks.insert(seq, task);
        TimerId(seq)
    }

    /// Schedule `task` to fire `delay` after the current time.
    pub fn schedule_after(&mut self, delay: Millis, task: T) -> TimerId {
        self.schedule_at(self.now + delay, task)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.tasks.remove(&id.0).is_some()
    }

    /// Drop every pending timer. The clock is left where it is.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.tasks.clear();
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&mut self) -> Option<Millis> {
        self.discard_stale();
        self.slots.peek().map(|slot| slot.due)
    }

    /// Pop the earliest live timer due at or before `until`, moving the clock
    /// to its due time. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, T)> {
        self.discard_stale();
        let slot = *self.slots.peek()?;
        if slot.due > until {
            return None;
        }
        self.slots.pop();
        let task = self.tasks.remove(&slot.seq)?;
        if slot.due > self.now {
            self.now = slot.due;
        }
        Some((slot.due, task))
    }

    /// Move the clock forward to `until`. The clock never runs backwards.
    pub fn advance_to(&mut self, until: Millis) {
        if until > self.now {
            self.now = until;
        }
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn discard_stale(&mut self) {
        while let Some(slot) = self.slots.peek() {
            if self.tasks.contains_key(&slot.seq) {
                break;
            }
            self.slots.pop();
        }
    }
}
