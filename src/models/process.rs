//! Process model.
//!
//! A process is a unit of CPU work competing for a single processor. It
//! carries its static description (burst, arrival, priority) plus the
//! mutable state a scheduling run fills in.
//!
//! # Time Representation
//! All times are integer cycles on a simulated clock starting at t=0.
//! No wall-clock time is involved.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// A process to be scheduled.
///
/// Created from validated input and owned by exactly one simulation run.
/// Schedulers mutate `remaining_time` and the timestamp fields in place,
/// so reuse across runs requires a fresh clone (or [`Process::reset`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub pid: String,
    /// Total CPU cycles required (> 0).
    pub burst_time: i64,
    /// Cycle at which the process becomes schedulable (>= 0).
    pub arrival_time: i64,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// Cycles still to run. Starts at `burst_time`.
    pub remaining_time: i64,
    /// Cycle of first execution.
    pub start_time: Option<i64>,
    /// Cycle at which the last burst cycle finished.
    pub completion_time: Option<i64>,
    /// `turnaround_time - burst_time`.
    pub waiting_time: Option<i64>,
    /// `completion_time - arrival_time`.
    pub turnaround_time: Option<i64>,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(pid: impl Into<String>, burst_time: i64, arrival_time: i64) -> Self {
        Self {
            pid: pid.into(),
            burst_time,
            arrival_time,
            priority: 0,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Clears all simulation state so the process can be scheduled again.
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.start_time = None;
        self.completion_time = None;
        self.waiting_time = None;
        self.turnaround_time = None;
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: i64) -> bool {
        self.arrival_time <= now
    }

    /// Whether all burst cycles have run.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Records the first execution cycle. Later calls are ignored.
    pub fn mark_started(&mut self, now: i64) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Consumes `cycles` of remaining work.
    pub fn run_for(&mut self, cycles: i64) {
        self.remaining_time -= cycles;
    }

    /// Records completion and derives turnaround and waiting time.
    ///
    /// Metrics are computed once; completing an already completed process
    /// leaves the first recorded values in place.
    pub fn complete_at(&mut self, now: i64) {
        if self.completion_time.is_some() {
            return;
        }
        let turnaround = now - self.arrival_time;
        self.remaining_time = 0;
        self.completion_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }

    /// Cycles between arrival and first execution.
    pub fn response_time(&self) -> Option<i64> {
        self.start_time.map(|s| s - self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new("P1", 5, 2).with_priority(3);
        assert_eq!(p.pid, "P1");
        assert_eq!(p.burst_time, 5);
        assert_eq!(p.arrival_time, 2);
        assert_eq!(p.priority, 3);
        assert_eq!(p.remaining_time, 5);
        assert!(p.start_time.is_none());
        assert!(!p.is_finished());
    }

    #[test]
    fn test_metrics_on_completion() {
        let mut p = Process::new("P1", 3, 1);
        p.mark_started(4);
        p.run_for(3);
        p.complete_at(7);
        assert_eq!(p.completion_time, Some(7));
        assert_eq!(p.turnaround_time, Some(6));
        assert_eq!(p.waiting_time, Some(3));
        assert_eq!(p.response_time(), Some(3));
        assert!(p.is_finished());
    }

    #[test]
    fn test_start_recorded_once() {
        let mut p = Process::new("P1", 4, 0);
        p.mark_started(0);
        p.mark_started(2);
        assert_eq!(p.start_time, Some(0));
    }

    #[test]
    fn test_completion_recorded_once() {
        let mut p = Process::new("P1", 2, 0);
        p.complete_at(2);
        p.complete_at(9);
        assert_eq!(p.completion_time, Some(2));
        assert_eq!(p.waiting_time, Some(0));
    }

    #[test]
    fn test_reset() {
        let mut p = Process::new("P1", 2, 0);
        p.mark_started(0);
        p.run_for(2);
        p.complete_at(2);
        p.reset();
        assert_eq!(p.remaining_time, 2);
        assert!(p.start_time.is_none());
        assert!(p.completion_time.is_none());
        assert!(p.waiting_time.is_none());
        assert!(p.turnaround_time.is_none());
    }
}
