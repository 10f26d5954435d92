//! Resource synchronization disciplines.
//!
//! Two interchangeable disciplines replay a set of resource requests
//! ([`Action`](crate::models::Action)s) against shared
//! [`Resource`](crate::models::Resource)s and record every access, wait,
//! and hand-off in a [`Timeline`](crate::models::Timeline):
//!
//! | Discipline | Concurrent holders | Clock |
//! |------------|-------------------|-------|
//! | Mutex | one critical section at a time | serialized by sections |
//! | Semaphore | up to `count` per resource | follows request cycles |
//!
//! Every access holds its slot for [`HOLD_CYCLES`]. A process that fails
//! to acquire is queued FIFO on the resource and is handed the slot
//! directly when a holder releases it (`GRANTED`).
//!
//! # Usage
//!
//! ```
//! use u_ossim::models::{Action, ActionState, Resource};
//! use u_ossim::sync::{SyncPolicy, Synchronizer};
//!
//! let outcome = Synchronizer::new(SyncPolicy::Mutex)
//!     .simulate(
//!         &[],
//!         vec![Resource::exclusive("R")],
//!         vec![Action::read("P1", "R", 0), Action::write("P2", "R", 0)],
//!     )
//!     .unwrap();
//! let events = outcome.timeline.as_tuples();
//! assert_eq!(events[1], ("P2", "WRITE".to_string(), 0, 1, ActionState::Waiting));
//! assert_eq!(events[2], ("P2", "GRANTED".to_string(), 1, 2, ActionState::Accessed));
//! ```
//!
//! # References
//!
//! - Dijkstra (1965), "Cooperating Sequential Processes"
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 6

mod engine;
mod mutex;
mod semaphore;
mod state;

pub use engine::{SyncConfig, SyncOutcome, Synchronizer};
pub use mutex::Mutex;
pub use semaphore::Semaphore;
pub use crate::models::HOLD_CYCLES;
pub use state::SyncState;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::error::SimulationError;

/// A synchronization discipline.
///
/// Implementations drive a validated, reset [`SyncState`] to completion:
/// every action is attempted exactly once, every hold is released, and
/// one step is charged per attempt.
pub trait SyncDiscipline: Send + Sync + Debug {
    /// Discipline name (e.g., "MUTEX").
    fn name(&self) -> &'static str;

    /// Replays all actions in `state`.
    fn run(&self, state: &mut SyncState) -> Result<(), SimulationError>;

    /// Discipline description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Closed set of synchronization disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncPolicy {
    Mutex,
    Semaphore,
}

impl SyncPolicy {
    /// Both disciplines.
    pub const ALL: [SyncPolicy; 2] = [SyncPolicy::Mutex, SyncPolicy::Semaphore];

    /// The discipline implementing this policy.
    pub fn discipline(&self) -> Box<dyn SyncDiscipline> {
        match self {
            SyncPolicy::Mutex => Box::new(Mutex),
            SyncPolicy::Semaphore => Box::new(Semaphore),
        }
    }
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPolicy::Mutex => f.write_str("MUTEX"),
            SyncPolicy::Semaphore => f.write_str("SEMAPHORE"),
        }
    }
}

impl FromStr for SyncPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MUTEX" => Ok(SyncPolicy::Mutex),
            "SEMAPHORE" | "SEM" => Ok(SyncPolicy::Semaphore),
            other => Err(format!("unknown synchronization policy '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("mutex".parse::<SyncPolicy>(), Ok(SyncPolicy::Mutex));
        assert_eq!(" Semaphore ".parse::<SyncPolicy>(), Ok(SyncPolicy::Semaphore));
        assert!("spinlock".parse::<SyncPolicy>().is_err());
        for policy in SyncPolicy::ALL {
            assert_eq!(policy.to_string().parse::<SyncPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_discipline_names() {
        let names: Vec<_> = SyncPolicy::ALL.iter().map(|p| p.discipline().name()).collect();
        assert_eq!(names, vec!["MUTEX", "SEMAPHORE"]);
    }
}
