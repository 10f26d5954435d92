//! Scheduling driver.
//!
//! Runs the same pre-flight validation and post-run checks around every
//! policy:
//!
//! 1. Validate processes (non-empty, unique well-formed pids, positive
//!    bursts, non-negative arrivals and priorities).
//! 2. Check the Round Robin quantum against `max_quantum`.
//! 3. Reset process state and run the policy under a step budget of
//!    `len(processes) * steps_per_process`.
//! 4. Reject an empty schedule, and any schedule that overlaps or does not
//!    give each process exactly its burst time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Policy, ScheduleKpi};
use crate::error::{SimResult, SimulationError, SimulationErrorKind};
use crate::guard::StepGuard;
use crate::models::{Process, Schedule};
use crate::validation::validate_processes;

/// Scheduler limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Step budget per input process (default: 1000).
    pub steps_per_process: usize,
    /// Largest accepted Round Robin quantum (default: 1000).
    pub max_quantum: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            steps_per_process: 1000,
            max_quantum: 1000,
        }
    }
}

impl SchedulerConfig {
    /// Sets the step budget per process.
    pub fn with_steps_per_process(mut self, steps: usize) -> Self {
        self.steps_per_process = steps;
        self
    }

    /// Sets the largest accepted quantum.
    pub fn with_max_quantum(mut self, max_quantum: u32) -> Self {
        self.max_quantum = max_quantum;
        self
    }
}

/// Result of a scheduling run: the schedule plus the processes with their
/// completion metrics filled in (input order preserved).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingOutcome {
    /// Policy that produced the schedule.
    pub policy: Policy,
    /// CPU intervals in time order.
    pub schedule: Schedule,
    /// Processes after the run.
    pub processes: Vec<Process>,
}

impl SchedulingOutcome {
    /// Computes schedule metrics.
    pub fn kpi(&self) -> ScheduleKpi {
        ScheduleKpi::calculate(&self.schedule, &self.processes)
    }

    /// Finds a process by pid.
    pub fn process(&self, pid: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

/// Runs one scheduling policy over owned process sets.
///
/// # Example
///
/// ```
/// use u_ossim::models::Process;
/// use u_ossim::scheduler::{Policy, Scheduler};
///
/// let processes = vec![
///     Process::new("P1", 5, 0),
///     Process::new("P2", 3, 1),
///     Process::new("P3", 1, 2),
/// ];
/// let outcome = Scheduler::new(Policy::Fifo).run(processes).unwrap();
/// assert_eq!(
///     outcome.schedule.as_tuples(),
///     vec![("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 9)]
/// );
/// assert_eq!(outcome.process("P3").unwrap().waiting_time, Some(6));
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    policy: Policy,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler with default limits.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            config: SchedulerConfig::default(),
        }
    }

    /// Sets the scheduler limits.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// The configured policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Schedules `processes`, returning the schedule and updated processes.
    ///
    /// Any prior simulation state on the processes is discarded.
    pub fn run(&self, mut processes: Vec<Process>) -> SimResult<SchedulingOutcome> {
        validate_processes(&processes)?;
        self.check_quantum()?;

        for p in &mut processes {
            p.reset();
        }

        let strategy = self.policy.strategy();
        let mut guard = StepGuard::scaled(processes.len(), self.config.steps_per_process);
        log::debug!(
            "scheduling {} processes with {} (step limit {})",
            processes.len(),
            strategy.name(),
            guard.limit()
        );

        let schedule = strategy.schedule(&mut processes, &mut guard)?;

        if schedule.is_empty() {
            return Err(SimulationError::new(
                SimulationErrorKind::EmptyResult,
                format!("{} produced an empty schedule", strategy.name()),
            )
            .into());
        }
        verify(&schedule, &processes)?;

        log::debug!(
            "{} finished: {} intervals, makespan {}, {} steps",
            strategy.name(),
            schedule.len(),
            schedule.makespan(),
            guard.steps()
        );

        Ok(SchedulingOutcome {
            policy: self.policy,
            schedule,
            processes,
        })
    }

    fn check_quantum(&self) -> Result<(), SimulationError> {
        if let Policy::RoundRobin { quantum } = self.policy {
            if quantum == 0 || quantum > self.config.max_quantum {
                return Err(SimulationError::new(
                    SimulationErrorKind::QuantumOutOfRange,
                    format!(
                        "quantum must be in 1..={}, got {quantum}",
                        self.config.max_quantum
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Checks the single-CPU schedule invariants.
fn verify(schedule: &Schedule, processes: &[Process]) -> Result<(), SimulationError> {
    if !schedule.is_non_overlapping() {
        return Err(invariant("schedule contains overlapping intervals"));
    }

    let cpu_time: HashMap<String, i64> = schedule.cpu_time_by_pid();
    for p in processes {
        let given = cpu_time.get(&p.pid).copied().unwrap_or(0);
        if given != p.burst_time {
            return Err(invariant(format!(
                "process '{}' ran {given} cycles, burst is {}",
                p.pid, p.burst_time
            )));
        }
        if p.completion_time.is_none() || p.start_time.is_none() {
            return Err(invariant(format!("process '{}' never completed", p.pid)));
        }
    }
    Ok(())
}

fn invariant(message: impl Into<String>) -> SimulationError {
    SimulationError::new(SimulationErrorKind::InvariantViolated, message)
}

/// Earliest arrival among unfinished processes; `None` once all finished.
pub(crate) fn earliest_pending_arrival(processes: &[Process]) -> Option<i64> {
    processes
        .iter()
        .filter(|p| !p.is_finished())
        .map(|p| p.arrival_time)
        .min()
}

/// Non-preemptive selection loop shared by SJF and Priority.
///
/// Whenever the CPU is free, runs to completion the arrived, unfinished
/// process with the smallest `key` (first in input order on ties). If
/// nothing has arrived, the clock jumps to the earliest pending arrival.
pub(crate) fn run_non_preemptive<K, F>(
    processes: &mut [Process],
    guard: &mut StepGuard,
    key: F,
) -> Result<Schedule, SimulationError>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut schedule = Schedule::new();
    let mut now = 0;

    while let Some(next_arrival) = earliest_pending_arrival(processes) {
        guard.tick()?;

        let selected = processes
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_finished() && p.has_arrived(now))
            .min_by_key(|(_, p)| key(p))
            .map(|(i, _)| i);

        let Some(i) = selected else {
            now = next_arrival;
            continue;
        };

        let p = &mut processes[i];
        let end = now + p.remaining_time;
        p.mark_started(now);
        p.run_for(p.remaining_time);
        p.complete_at(end);
        log::trace!("{} runs [{now}, {end})", p.pid);
        schedule.push(p.pid.clone(), now, end);
        now = end;
    }

    Ok(schedule)
}
