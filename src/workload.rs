//! Random workload generation.
//!
//! Produces valid process sets and request sets for property tests,
//! benchmarks, and demos. Generation is driven entirely by the caller's
//! RNG, so a seeded RNG reproduces the same workload.
//!
//! Generated identifiers are `P1..Pn` for processes and `R1..Rn` for
//! resources.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Action, ActionType, Process, Resource};

/// Value ranges for generated workloads. All ranges are inclusive.
///
/// Every range must be non-empty; generation panics otherwise, as
/// [`Rng::random_range`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of processes (default: 2..=8).
    pub processes: RangeInclusive<usize>,
    /// Burst time per process (default: 1..=10).
    pub burst: RangeInclusive<i64>,
    /// Arrival time per process (default: 0..=15).
    pub arrival: RangeInclusive<i64>,
    /// Priority per process (default: 0..=5).
    pub priority: RangeInclusive<i32>,
    /// Number of resources (default: 1..=3).
    pub resources: RangeInclusive<usize>,
    /// Slot count per resource (default: 1..=3).
    pub slots: RangeInclusive<i32>,
    /// Number of actions (default: 1..=12).
    pub actions: RangeInclusive<usize>,
    /// Issue cycle per action (default: 0..=6).
    pub cycle: RangeInclusive<i64>,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            processes: 2..=8,
            burst: 1..=10,
            arrival: 0..=15,
            priority: 0..=5,
            resources: 1..=3,
            slots: 1..=3,
            actions: 1..=12,
            cycle: 0..=6,
        }
    }
}

impl WorkloadSpec {
    /// Sets the process count range.
    pub fn with_processes(mut self, range: RangeInclusive<usize>) -> Self {
        self.processes = range;
        self
    }

    /// Sets the burst time range.
    pub fn with_burst(mut self, range: RangeInclusive<i64>) -> Self {
        self.burst = range;
        self
    }

    /// Sets the arrival time range.
    pub fn with_arrival(mut self, range: RangeInclusive<i64>) -> Self {
        self.arrival = range;
        self
    }

    /// Sets the priority range.
    pub fn with_priority(mut self, range: RangeInclusive<i32>) -> Self {
        self.priority = range;
        self
    }

    /// Sets the resource count and per-resource slot ranges.
    pub fn with_resources(
        mut self,
        resources: RangeInclusive<usize>,
        slots: RangeInclusive<i32>,
    ) -> Self {
        self.resources = resources;
        self.slots = slots;
        self
    }

    /// Sets the action count and issue cycle ranges.
    pub fn with_actions(
        mut self,
        actions: RangeInclusive<usize>,
        cycle: RangeInclusive<i64>,
    ) -> Self {
        self.actions = actions;
        self.cycle = cycle;
        self
    }
}

/// Generates a process set.
pub fn random_processes<R: Rng>(rng: &mut R, spec: &WorkloadSpec) -> Vec<Process> {
    let n = rng.random_range(spec.processes.clone()).max(1);
    (1..=n)
        .map(|i| {
            Process::new(
                format!("P{i}"),
                rng.random_range(spec.burst.clone()).max(1),
                rng.random_range(spec.arrival.clone()).max(0),
            )
            .with_priority(rng.random_range(spec.priority.clone()).max(0))
        })
        .collect()
}

/// Generates processes, resources, and actions that reference them.
pub fn random_sync_workload<R: Rng>(
    rng: &mut R,
    spec: &WorkloadSpec,
) -> (Vec<Process>, Vec<Resource>, Vec<Action>) {
    let processes = random_processes(rng, spec);

    let n = rng.random_range(spec.resources.clone()).max(1);
    let resources: Vec<Resource> = (1..=n)
        .map(|i| Resource::new(format!("R{i}"), rng.random_range(spec.slots.clone()).max(1)))
        .collect();

    let m = rng.random_range(spec.actions.clone()).max(1);
    let actions = (0..m)
        .map(|_| {
            let pid = &processes[rng.random_range(0..processes.len())].pid;
            let resource = &resources[rng.random_range(0..resources.len())].name;
            let action_type = if rng.random_bool(0.5) {
                ActionType::Read
            } else {
                ActionType::Write
            };
            let cycle = rng.random_range(spec.cycle.clone()).max(0);
            Action::new(pid.clone(), action_type, resource.clone(), cycle)
        })
        .collect();

    (processes, resources, actions)
}
