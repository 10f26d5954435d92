//! Synchronization driver.
//!
//! Validates the request set, resets resource and action state, runs the
//! discipline under a step budget of `len(actions) * steps_per_action`,
//! and checks that the run left every resource quiescent.

use serde::{Deserialize, Serialize};

use super::{SyncPolicy, SyncState};
use crate::error::{SimResult, SimulationError, SimulationErrorKind};
use crate::guard::StepGuard;
use crate::models::{Action, ActionState, Process, Resource, Timeline};
use crate::validation::validate_sync_input;

/// Synchronizer limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Step budget per input action (default: 1000).
    pub steps_per_action: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            steps_per_action: 1000,
        }
    }
}

impl SyncConfig {
    /// Sets the step budget per action.
    pub fn with_steps_per_action(mut self, steps: usize) -> Self {
        self.steps_per_action = steps;
        self
    }
}

/// Result of a synchronization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Discipline that produced the timeline.
    pub policy: SyncPolicy,
    /// Access, wait, and hand-off events in emission order.
    pub timeline: Timeline,
    /// Resources after the run (all quiescent).
    pub resources: Vec<Resource>,
    /// Actions after the run, input order, with final states.
    pub actions: Vec<Action>,
}

impl SyncOutcome {
    /// Actions that never obtained their resource.
    pub fn starved(&self) -> Vec<&Action> {
        self.actions.iter().filter(|a| !a.is_accessed()).collect()
    }
}

/// Runs one synchronization discipline over owned resources and actions.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    policy: SyncPolicy,
    config: SyncConfig,
}

impl Synchronizer {
    /// Creates a synchronizer with default limits.
    pub fn new(policy: SyncPolicy) -> Self {
        Self {
            policy,
            config: SyncConfig::default(),
        }
    }

    /// Sets the synchronizer limits.
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// The configured policy.
    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Replays `actions` against `resources`.
    ///
    /// `processes` only constrains which pids actions may name; pass an
    /// empty slice to accept any pid. Prior availability, queues, and action
    /// states are discarded before the run.
    pub fn simulate(
        &self,
        processes: &[Process],
        mut resources: Vec<Resource>,
        mut actions: Vec<Action>,
    ) -> SimResult<SyncOutcome> {
        validate_sync_input(processes, &resources, &actions)?;

        for r in &mut resources {
            r.reset();
        }
        for a in &mut actions {
            a.state = ActionState::Waiting;
        }

        let discipline = self.policy.discipline();
        let guard = StepGuard::scaled(actions.len(), self.config.steps_per_action);
        log::debug!(
            "replaying {} actions on {} resources with {} (step limit {})",
            actions.len(),
            resources.len(),
            discipline.name(),
            guard.limit()
        );

        let mut state = SyncState::new(resources, actions, guard);
        discipline.run(&mut state)?;

        let SyncState {
            resources,
            actions,
            timeline,
            ..
        } = state;

        if timeline.is_empty() {
            return Err(SimulationError::new(
                SimulationErrorKind::EmptyResult,
                format!("{} produced an empty timeline", discipline.name()),
            )
            .into());
        }
        if let Some(r) = resources.iter().find(|r| !r.is_quiescent()) {
            return Err(SimulationError::new(
                SimulationErrorKind::InvariantViolated,
                format!(
                    "resource '{}' not quiescent after run ({} of {} available, {} waiting)",
                    r.name,
                    r.available,
                    r.count,
                    r.waiting.len()
                ),
            )
            .into());
        }

        log::debug!(
            "{} finished: {} events, {} waits, ends at {}",
            discipline.name(),
            timeline.len(),
            timeline.wait_count(),
            timeline.end_time()
        );

        Ok(SyncOutcome {
            policy: self.policy,
            timeline,
            resources,
            actions,
        })
    }
}
