//! One-shot timers for the event loop, ordered by firing time.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

use super::debounce::DebounceTimer;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scheduled {
    Tick,
    Debounce(DebounceTimer),
}

#[derive(Debug)]
struct Entry {
    due: Instant,
    seq: u64,
    what: Scheduled,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Ties on `due` fire in scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, what: Scheduled) {
        self.seq += 1;
        self.queue.push(Reverse(Entry {
            due,
            seq: self.seq,
            what,
        }));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.peek().map(|Reverse(e)| e.due)
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Scheduled> {
        if self.next_deadline()? > now {
            return None;
        }
        self.queue.pop().map(|Reverse(e)| e.what)
    }
}
