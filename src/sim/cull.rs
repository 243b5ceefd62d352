//! Deferred actor removal
//!
//! Dead actors linger for a short time so their death sprite stays on
//! screen. The queue holds only handles; the arena owns the actors.
//! Deadlines come from an injected [`Clock`] so tests never depend on wall
//! time.

use std::cell::Cell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use super::actor::ActorId;

/// Monotonic time source, measured from an arbitrary epoch
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real time since construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-advanced clock for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A scheduled removal. Ties on deadline fire in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct CullEntry {
    deadline: Duration,
    seq: u64,
    id: ActorId,
}

/// Min-heap of removal deadlines
#[derive(Debug, Default)]
pub struct CullQueue {
    heap: BinaryHeap<Reverse<CullEntry>>,
    next_seq: u64,
}

impl CullQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `id` for removal `delay` after `now`
    pub fn schedule(&mut self, id: ActorId, now: Duration, delay: Duration) {
        let entry = CullEntry {
            deadline: now + delay,
            seq: self.next_seq,
            id,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    /// Pop every entry whose deadline has passed, earliest first.
    ///
    /// The same id may come out more than once if it was scheduled twice;
    /// callers treat removal of an absent actor as a no-op.
    pub fn drain_due(&mut self, now: Duration) -> Vec<ActorId> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.heap.peek() {
            if entry.deadline > now {
                break;
            }
            due.push(entry.id);
            self.heap.pop();
        }
        due
    }

    /// Whether `id` has a pending entry
    pub fn contains(&self, id: ActorId) -> bool {
        self.heap.iter().any(|Reverse(entry)| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = CullQueue::new();
        queue.schedule(ActorId(1), Duration::ZERO, 250 * MS);
        queue.schedule(ActorId(2), Duration::ZERO, Duration::ZERO);
        queue.schedule(ActorId(3), Duration::ZERO, 100 * MS);

        assert_eq!(queue.drain_due(Duration::ZERO), vec![ActorId(2)]);
        assert_eq!(queue.drain_due(200 * MS), vec![ActorId(3)]);
        assert!(queue.drain_due(249 * MS).is_empty());
        assert_eq!(queue.drain_due(250 * MS), vec![ActorId(1)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_deadline_keeps_schedule_order() {
        let mut queue = CullQueue::new();
        for id in [5, 3, 9] {
            queue.schedule(ActorId(id), Duration::ZERO, 10 * MS);
        }
        assert_eq!(
            queue.drain_due(10 * MS),
            vec![ActorId(5), ActorId(3), ActorId(9)]
        );
    }

    #[test]
    fn test_double_schedule() {
        let mut queue = CullQueue::new();
        queue.schedule(ActorId(7), Duration::ZERO, Duration::ZERO);
        queue.schedule(ActorId(7), Duration::ZERO, Duration::ZERO);
        assert!(queue.contains(ActorId(7)));
        assert_eq!(queue.drain_due(Duration::ZERO).len(), 2);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(16 * MS);
        clock.advance(16 * MS);
        assert_eq!(clock.now(), 32 * MS);
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);

        let mut queue = CullQueue::new();
        queue.schedule(ActorId(1), first, Duration::ZERO);
        assert_eq!(queue.drain_due(clock.now()), vec![ActorId(1)]);
    }
}
