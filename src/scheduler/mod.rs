//! Single-CPU scheduling policies.
//!
//! Five interchangeable policies turn a process set into a [`Schedule`]:
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FIFO | no | earliest arrival, input order on ties |
//! | SJF | no | shortest burst among arrived |
//! | SRT | yes | shortest remaining time among arrived |
//! | Round Robin | yes | FIFO ready queue, fixed quantum |
//! | Priority | no | lowest priority value, then earliest arrival |
//!
//! All ties not covered by the table resolve to input order, so identical
//! input always yields an identical schedule.
//!
//! # Usage
//!
//! ```
//! use u_ossim::models::Process;
//! use u_ossim::scheduler::{Policy, Scheduler};
//!
//! let processes = vec![
//!     Process::new("P1", 5, 0),
//!     Process::new("P2", 3, 1),
//! ];
//! let outcome = Scheduler::new(Policy::RoundRobin { quantum: 2 })
//!     .run(processes)
//!     .unwrap();
//! assert_eq!(outcome.schedule.as_tuples()[0], ("P1", 0, 2));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Schrage (1968), optimality of shortest-remaining-processing-time

mod engine;
mod fifo;
mod kpi;
mod priority;
mod round_robin;
mod sjf;
mod srt;

pub use engine::{Scheduler, SchedulerConfig, SchedulingOutcome};
pub use fifo::Fifo;
pub use kpi::ScheduleKpi;
pub use priority::Priority;
pub use round_robin::{RoundRobin, DEFAULT_QUANTUM};
pub use sjf::Sjf;
pub use srt::Srt;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::error::SimulationError;
use crate::guard::StepGuard;
use crate::models::{Process, Schedule};

/// A CPU scheduling policy.
///
/// Implementations receive processes that are already validated and reset
/// (`remaining_time == burst_time`, no timestamps). They must run every
/// process to completion, record `start_time` once and completion through
/// [`Process::complete_at`], and charge `guard` once per decision.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FIFO", "SRT").
    fn name(&self) -> &'static str;

    /// Produces the CPU intervals for `processes`, mutating their state.
    fn schedule(
        &self,
        processes: &mut [Process],
        guard: &mut StepGuard,
    ) -> Result<Schedule, SimulationError>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Closed set of scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    Fifo,
    Sjf,
    Srt,
    RoundRobin { quantum: u32 },
    Priority,
}

impl Policy {
    /// All policies, Round Robin with the default quantum.
    pub const ALL: [Policy; 5] = [
        Policy::Fifo,
        Policy::Sjf,
        Policy::Srt,
        Policy::RoundRobin {
            quantum: DEFAULT_QUANTUM,
        },
        Policy::Priority,
    ];

    /// The strategy implementing this policy.
    pub fn strategy(&self) -> Box<dyn SchedulingPolicy> {
        match *self {
            Policy::Fifo => Box::new(Fifo),
            Policy::Sjf => Box::new(Sjf),
            Policy::Srt => Box::new(Srt),
            Policy::RoundRobin { quantum } => Box::new(RoundRobin::new(quantum)),
            Policy::Priority => Box::new(Priority),
        }
    }

    /// Whether the policy may interrupt a running process.
    pub fn is_preemptive(&self) -> bool {
        match self {
            Policy::Srt | Policy::RoundRobin { .. } => true,
            Policy::Fifo | Policy::Sjf | Policy::Priority => false,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => f.write_str("FIFO"),
            Policy::Sjf => f.write_str("SJF"),
            Policy::Srt => f.write_str("SRT"),
            Policy::RoundRobin { quantum } => write!(f, "RR:{quantum}"),
            Policy::Priority => f.write_str("PRIORITY"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    /// Parses `FIFO`, `SJF`, `SRT`, `PRIORITY`, or `RR[:quantum]`
    /// (also `ROUND_ROBIN`), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let (name, arg) = match upper.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (upper.as_str(), None),
        };

        let policy = match name {
            "FIFO" | "FCFS" => Policy::Fifo,
            "SJF" => Policy::Sjf,
            "SRT" | "SRTF" => Policy::Srt,
            "PRIORITY" => Policy::Priority,
            "RR" | "ROUND_ROBIN" | "ROUND-ROBIN" | "ROUNDROBIN" => {
                let quantum = match arg {
                    Some(q) => q
                        .parse::<u32>()
                        .map_err(|_| format!("invalid quantum '{q}'"))?,
                    None => DEFAULT_QUANTUM,
                };
                return Ok(Policy::RoundRobin { quantum });
            }
            other => return Err(format!("unknown scheduling policy '{other}'")),
        };

        match arg {
            Some(_) => Err(format!("policy {policy} takes no argument")),
            None => Ok(policy),
        }
    }
}
