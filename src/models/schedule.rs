//! CPU schedule (solution) model.
//!
//! A schedule is the ordered list of CPU occupancy intervals produced by a
//! single-processor scheduling run.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exclusive CPU occupancy by `pid` over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInterval {
    /// Running process.
    pub pid: String,
    /// First cycle (inclusive).
    pub start: i64,
    /// Last cycle (exclusive).
    pub end: i64,
}

/// A complete single-CPU schedule, intervals in time order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// CPU intervals.
    pub intervals: Vec<ScheduleInterval>,
}

impl ScheduleInterval {
    /// Creates a new interval.
    pub fn new(pid: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            pid: pid.into(),
            start,
            end,
        }
    }

    /// Length in cycles.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether two intervals share at least one cycle.
    #[inline]
    pub fn overlaps(&self, other: &ScheduleInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval. Zero-length intervals are dropped.
    pub fn push(&mut self, pid: impl Into<String>, start: i64, end: i64) {
        if end > start {
            self.intervals.push(ScheduleInterval::new(pid, start, end));
        }
    }

    /// Whether no interval was produced.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Makespan: latest end time.
    pub fn makespan(&self) -> i64 {
        self.intervals.iter().map(|i| i.end).max().unwrap_or(0)
    }

    /// Intervals of one process, in time order.
    pub fn intervals_for(&self, pid: &str) -> Vec<&ScheduleInterval> {
        self.intervals.iter().filter(|i| i.pid == pid).collect()
    }

    /// Total CPU cycles given to `pid`.
    pub fn cpu_time_for(&self, pid: &str) -> i64 {
        self.intervals_for(pid).iter().map(|i| i.duration()).sum()
    }

    /// CPU cycles per process.
    pub fn cpu_time_by_pid(&self) -> HashMap<String, i64> {
        let mut busy: HashMap<String, i64> = HashMap::new();
        for i in &self.intervals {
            *busy.entry(i.pid.clone()).or_insert(0) += i.duration();
        }
        busy
    }

    /// Total busy cycles.
    pub fn busy_time(&self) -> i64 {
        self.intervals.iter().map(|i| i.duration()).sum()
    }

    /// End of the last interval of `pid`.
    pub fn completion_time(&self, pid: &str) -> Option<i64> {
        self.intervals_for(pid).iter().map(|i| i.end).max()
    }

    /// Whether no two intervals overlap.
    pub fn is_non_overlapping(&self) -> bool {
        let mut sorted: Vec<&ScheduleInterval> = self.intervals.iter().collect();
        sorted.sort_by_key(|i| i.start);
        sorted.windows(2).all(|w| w[0].end <= w[1].start)
    }

    /// Number of times the CPU switches from one process to another.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|w| w[0].pid != w[1].pid)
            .count()
    }

    /// `(pid, start, end)` tuples, the boundary format renderers consume.
    pub fn as_tuples(&self) -> Vec<(&str, i64, i64)> {
        self.intervals
            .iter()
            .map(|i| (i.pid.as_str(), i.start, i.end))
            .collect()
    }
}

impl From<Vec<ScheduleInterval>> for Schedule {
    fn from(intervals: Vec<ScheduleInterval>) -> Self {
        Self { intervals }
    }
}
