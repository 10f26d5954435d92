//! Shared resource model.
//!
//! A resource has a fixed number of slots (`count`). Processes acquire a
//! slot or wait in a FIFO queue until a holder releases one.
//!
//! # Hand-off
//! When a holder releases while processes are waiting, the slot passes
//! directly to the head of the queue and `available` does not change. The
//! invariant `0 <= available <= count` therefore holds for any sequence of
//! acquire/release calls that only releases held slots. Releasing a slot
//! nobody holds is not absorbed: `available` exceeds `count` and
//! [`Resource::is_consistent`] reports it.
//!
//! # Reference
//! Dijkstra (1968), "Cooperating Sequential Processes"

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A resource with `count` interchangeable slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource name.
    pub name: String,
    /// Number of slots (> 0).
    pub count: i32,
    /// Free slots (0..=count).
    pub available: i32,
    /// Processes waiting for a slot, oldest first. No duplicates.
    pub waiting: VecDeque<String>,
}

impl Resource {
    /// Creates a resource with all slots free.
    pub fn new(name: impl Into<String>, count: i32) -> Self {
        Self {
            name: name.into(),
            count,
            available: count,
            waiting: VecDeque::new(),
        }
    }

    /// Creates a single-slot resource.
    pub fn exclusive(name: impl Into<String>) -> Self {
        Self::new(name, 1)
    }

    /// Frees every slot and empties the wait queue.
    pub fn reset(&mut self) {
        self.available = self.count;
        self.waiting.clear();
    }

    /// Tries to take a slot for `pid`.
    ///
    /// Returns `true` on success. Otherwise enqueues `pid` (if not already
    /// queued) and returns `false`.
    pub fn acquire(&mut self, pid: &str) -> bool {
        self.acquire_within(pid, self.count)
    }

    /// Like [`Resource::acquire`], but succeeds only while fewer than
    /// `limit` slots are held. `limit = 1` turns any resource into a mutex.
    pub fn acquire_within(&mut self, pid: &str, limit: i32) -> bool {
        if self.available > 0 && self.in_use() < limit {
            self.available -= 1;
            true
        } else {
            if !self.is_waiting(pid) {
                self.waiting.push_back(pid.to_string());
            }
            false
        }
    }

    /// Releases one held slot.
    ///
    /// If a process is waiting, the slot is handed to it and its pid is
    /// returned; `available` stays the same. Otherwise the slot is freed.
    pub fn release(&mut self) -> Option<String> {
        match self.waiting.pop_front() {
            Some(next) => Some(next),
            None => {
                self.available += 1;
                None
            }
        }
    }

    /// Whether `pid` is queued.
    pub fn is_waiting(&self, pid: &str) -> bool {
        self.waiting.iter().any(|w| w == pid)
    }

    /// Slots currently held.
    #[inline]
    pub fn in_use(&self) -> i32 {
        self.count - self.available
    }

    /// Whether no slot is held and nobody waits.
    pub fn is_quiescent(&self) -> bool {
        self.available == self.count && self.waiting.is_empty()
    }

    /// Whether `available` lies in `0..=count`.
    pub fn is_consistent(&self) -> bool {
        (0..=self.count).contains(&self.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_until_exhausted() {
        let mut r = Resource::new("R", 2);
        assert!(r.acquire("P1"));
        assert!(r.acquire("P2"));
        assert_eq!(r.available, 0);
        assert!(!r.acquire("P3"));
        assert_eq!(r.waiting, VecDeque::from(vec!["P3".to_string()]));
        assert!(r.is_consistent());
    }

    #[test]
    fn test_waiting_has_no_duplicates() {
        let mut r = Resource::exclusive("R");
        assert!(r.acquire("P1"));
        assert!(!r.acquire("P2"));
        assert!(!r.acquire("P2"));
        assert_eq!(r.waiting.len(), 1);
    }

    #[test]
    fn test_release_without_waiters_frees_slot() {
        let mut r = Resource::exclusive("R");
        assert!(r.acquire("P1"));
        assert_eq!(r.release(), None);
        assert_eq!(r.available, 1);
        assert!(r.is_quiescent());
    }

    #[test]
    fn test_hand_off_keeps_available() {
        let mut r = Resource::exclusive("R");
        assert!(r.acquire("P1"));
        assert!(!r.acquire("P2"));
        assert!(!r.acquire("P3"));

        assert_eq!(r.release().as_deref(), Some("P2"));
        assert_eq!(r.available, 0);
        assert_eq!(r.release().as_deref(), Some("P3"));
        assert_eq!(r.available, 0);
        assert_eq!(r.release(), None);
        assert_eq!(r.available, 1);
        assert!(r.is_quiescent());
    }

    #[test]
    fn test_repeated_hand_offs_do_not_drift() {
        let mut r = Resource::new("R", 2);
        assert!(r.acquire("A"));
        assert!(r.acquire("B"));
        for i in 0..50 {
            let pid = format!("W{i}");
            assert!(!r.acquire(&pid));
            assert_eq!(r.release(), Some(pid));
            assert!(r.is_consistent());
            assert_eq!(r.in_use(), 2);
        }
        r.release();
        r.release();
        assert!(r.is_quiescent());
    }

    #[test]
    fn test_release_of_unheld_slot_is_inconsistent() {
        let mut r = Resource::exclusive("R");
        assert_eq!(r.release(), None);
        assert_eq!(r.available, 2);
        assert!(!r.is_consistent());
        assert!(!r.is_quiescent());
    }

    #[test]
    fn test_acquire_within_limit() {
        let mut r = Resource::new("R", 3);
        assert!(r.acquire_within("A", 1));
        assert!(!r.acquire_within("B", 1));
        assert_eq!(r.available, 2);
        assert_eq!(r.waiting.len(), 1);

        // The freed slot passes to B; the holder count stays at one.
        assert_eq!(r.release().as_deref(), Some("B"));
        assert_eq!(r.in_use(), 1);
        assert_eq!(r.release(), None);
        assert!(r.is_quiescent());
    }

    #[test]
    fn test_reset() {
        let mut r = Resource::exclusive("R");
        r.acquire("A");
        r.acquire("B");
        r.reset();
        assert!(r.is_quiescent());
    }
}
