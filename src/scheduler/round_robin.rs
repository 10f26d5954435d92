//! Round Robin (preemptive, fixed quantum).
//!
//! # Algorithm
//!
//! 1. Admit every process with `arrival_time <= now` to the ready queue
//!    (arrival order, input order on ties).
//! 2. Run the head for `min(quantum, remaining_time)` cycles.
//! 3. Admit processes that arrived during the slice **before** re-queueing
//!    the preempted process.
//! 4. If the queue is empty while work remains, jump to the next arrival.
//!
//! The ordering in step 3 decides which process runs next when an arrival
//! lands inside a slice, so it is part of the contract.

use std::collections::VecDeque;

use super::SchedulingPolicy;
use crate::error::{SimulationError, SimulationErrorKind};
use crate::guard::StepGuard;
use crate::models::{Process, Schedule};

/// Quantum used when none is given.
pub const DEFAULT_QUANTUM: u32 = 2;

/// Round Robin with a fixed quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    /// Maximum cycles per turn.
    pub quantum: u32,
}

impl RoundRobin {
    /// Creates a Round Robin policy with the given quantum.
    pub fn new(quantum: u32) -> Self {
        Self { quantum }
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTUM)
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn schedule(
        &self,
        processes: &mut [Process],
        guard: &mut StepGuard,
    ) -> Result<Schedule, SimulationError> {
        if self.quantum == 0 {
            return Err(SimulationError::new(
                SimulationErrorKind::QuantumOutOfRange,
                "quantum must be positive",
            ));
        }
        let quantum = i64::from(self.quantum);

        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&i| processes[i].arrival_time);
        let mut admitted = 0;

        let mut ready: VecDeque<usize> = VecDeque::new();
        let mut schedule = Schedule::new();
        let mut unfinished = processes.len();
        let mut now = 0;

        while unfinished > 0 {
            guard.tick()?;
            admit(processes, &arrivals, &mut admitted, &mut ready, now);

            let Some(i) = ready.pop_front() else {
                match arrivals.get(admitted) {
                    Some(&next) => now = processes[next].arrival_time,
                    None => {
                        return Err(SimulationError::new(
                            SimulationErrorKind::InvariantViolated,
                            "ready queue drained with unfinished processes",
                        ))
                    }
                }
                continue;
            };

            let p = &mut processes[i];
            let slice = quantum.min(p.remaining_time);
            p.mark_started(now);
            p.run_for(slice);
            schedule.push(p.pid.clone(), now, now + slice);
            now += slice;

            admit(processes, &arrivals, &mut admitted, &mut ready, now);

            let p = &mut processes[i];
            if p.is_finished() {
                p.complete_at(now);
                unfinished -= 1;
            } else {
                log::trace!("{} preempted at {now}, {} left", p.pid, p.remaining_time);
                ready.push_back(i);
            }
        }

        Ok(schedule)
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

/// Moves every process that has arrived by `now` into the ready queue.
fn admit(
    processes: &[Process],
    arrivals: &[usize],
    admitted: &mut usize,
    ready: &mut VecDeque<usize>,
    now: i64,
) {
    while let Some(&i) = arrivals.get(*admitted) {
        if !processes[i].has_arrived(now) {
            break;
        }
        ready.push_back(i);
        *admitted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(quantum: u32, processes: &mut [Process]) -> Schedule {
        let mut guard = StepGuard::new(10_000);
        RoundRobin::new(quantum).schedule(processes, &mut guard).unwrap()
    }

    #[test]
    fn test_rr_quantum_two() {
        let mut procs = vec![Process::new("P1", 5, 0), Process::new("P2", 3, 1)];
        let s = run(2, &mut procs);
        assert_eq!(
            s.as_tuples(),
            vec![
                ("P1", 0, 2),
                ("P2", 2, 4),
                ("P1", 4, 6),
                ("P2", 6, 7),
                ("P1", 7, 8)
            ]
        );
        assert_eq!(procs[0].completion_time, Some(8));
        assert_eq!(procs[1].completion_time, Some(7));
        assert_eq!(procs[1].start_time, Some(2));
    }

    #[test]
    fn test_mid_slice_arrival_queued_before_preempted() {
        // P2 arrives during P1's first slice and is queued ahead of P1.
        let mut procs = vec![
            Process::new("P1", 4, 0),
            Process::new("P3", 2, 0),
            Process::new("P2", 2, 1),
        ];
        let s = run(2, &mut procs);
        let order: Vec<_> = s.intervals.iter().map(|i| i.pid.as_str()).collect();
        assert_eq!(order, vec!["P1", "P3", "P2", "P1"]);
    }

    #[test]
    fn test_arrival_at_slice_end_counts_as_during() {
        let mut procs = vec![Process::new("P1", 4, 0), Process::new("P2", 1, 2)];
        let s = run(2, &mut procs);
        assert_eq!(s.as_tuples(), vec![("P1", 0, 2), ("P2", 2, 3), ("P1", 3, 5)]);
    }

    #[test]
    fn test_idle_jump() {
        let mut procs = vec![Process::new("P1", 1, 0), Process::new("P2", 3, 10)];
        let s = run(2, &mut procs);
        assert_eq!(s.as_tuples(), vec![("P1", 0, 1), ("P2", 10, 12), ("P2", 12, 13)]);
    }

    #[test]
    fn test_large_quantum_is_fifo() {
        let mut procs = vec![
            Process::new("P1", 5, 0),
            Process::new("P2", 3, 1),
            Process::new("P3", 1, 2),
        ];
        let s = run(1000, &mut procs);
        assert_eq!(s.as_tuples(), vec![("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 9)]);
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let mut procs = vec![Process::new("P1", 1, 0)];
        let mut guard = StepGuard::new(10);
        let err = RoundRobin::new(0).schedule(&mut procs, &mut guard).unwrap_err();
        assert_eq!(err.kind, SimulationErrorKind::QuantumOutOfRange);
    }
}
