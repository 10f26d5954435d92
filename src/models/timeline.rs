//! Resource access timeline model.
//!
//! A timeline is the ordered list of access events produced by a
//! synchronization run: granted accesses, failed attempts, and hand-offs
//! to queued processes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ActionState, ActionType};

/// Length of every hold, and so of every event, in cycles.
pub const HOLD_CYCLES: i64 = 1;

/// What an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventLabel {
    /// A request issued by an action.
    Request(ActionType),
    /// A slot handed to a queued process on release.
    Granted,
}

/// Occupancy of (or attempt on) `resource` by `pid` over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Process the event belongs to.
    pub pid: String,
    /// Request kind, or `Granted` for a hand-off.
    pub label: EventLabel,
    /// Resource name.
    pub resource: String,
    /// First cycle (inclusive).
    pub start: i64,
    /// End cycle (exclusive), `start + HOLD_CYCLES`.
    pub end: i64,
    /// `Accessed` if the slot was held, `Waiting` if the attempt failed.
    pub state: ActionState,
}

/// Ordered synchronization events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Events in emission order.
    pub events: Vec<AccessEvent>,
}

impl fmt::Display for EventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventLabel::Request(kind) => kind.fmt(f),
            EventLabel::Granted => f.write_str("GRANTED"),
        }
    }
}

impl AccessEvent {
    /// Length in cycles.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether the resource was held during the event.
    pub fn is_access(&self) -> bool {
        self.state == ActionState::Accessed
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event covering `[start, start + HOLD_CYCLES)`.
    pub fn record(
        &mut self,
        pid: impl Into<String>,
        label: EventLabel,
        resource: impl Into<String>,
        start: i64,
        state: ActionState,
    ) {
        self.events.push(AccessEvent {
            pid: pid.into(),
            label,
            resource: resource.into(),
            start,
            end: start + HOLD_CYCLES,
            state,
        });
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Last cycle covered by any event.
    pub fn end_time(&self) -> i64 {
        self.events.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Events of one process.
    pub fn events_for(&self, pid: &str) -> Vec<&AccessEvent> {
        self.events.iter().filter(|e| e.pid == pid).collect()
    }

    /// Events in which `resource` was held.
    pub fn accesses_of(&self, resource: &str) -> Vec<&AccessEvent> {
        self.events
            .iter()
            .filter(|e| e.resource == resource && e.is_access())
            .collect()
    }

    /// Largest number of simultaneous holders of `resource` at any cycle.
    pub fn peak_holders(&self, resource: &str) -> usize {
        let accesses = self.accesses_of(resource);
        // Holder counts only change at event starts.
        accesses
            .iter()
            .map(|a| {
                accesses
                    .iter()
                    .filter(|b| b.start <= a.start && a.start < b.end)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    /// Number of failed attempts.
    pub fn wait_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.state == ActionState::Waiting)
            .count()
    }

    /// `(pid, label, start, end, state)` tuples, the boundary format
    /// renderers consume.
    pub fn as_tuples(&self) -> Vec<(&str, String, i64, i64, ActionState)> {
        self.events
            .iter()
            .map(|e| (e.pid.as_str(), e.label.to_string(), e.start, e.end, e.state))
            .collect()
    }
}
