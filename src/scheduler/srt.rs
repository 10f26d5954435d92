//! Shortest Remaining Time (preemptive).
//!
//! # Algorithm
//!
//! Event-driven: instead of stepping one cycle at a time, the clock jumps
//! to the earlier of the next arrival or the running process's completion.
//! Selection can only change at those two events, so the interval
//! boundaries are identical to a cycle-by-cycle simulation.
//!
//! 1. Select the arrived, unfinished process with the least remaining time
//!    (first in input order on ties).
//! 2. If it differs from the running process, close the running interval.
//! 3. Advance to the next event, charging the elapsed cycles.
//! 4. Close the interval when the running process completes.
//!
//! # Complexity
//! O(n^2): at most 2n events, each scanning all processes.

use super::engine::earliest_pending_arrival;
use super::SchedulingPolicy;
use crate::error::SimulationError;
use crate::guard::StepGuard;
use crate::models::{Process, Schedule};

/// Shortest Remaining Time.
#[derive(Debug, Clone, Copy)]
pub struct Srt;

impl SchedulingPolicy for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn schedule(
        &self,
        processes: &mut [Process],
        guard: &mut StepGuard,
    ) -> Result<Schedule, SimulationError> {
        let mut schedule = Schedule::new();
        let mut now = 0;
        // (index, start of the current contiguous run)
        let mut running: Option<(usize, i64)> = None;

        while let Some(pending) = earliest_pending_arrival(processes) {
            guard.tick()?;

            let Some(selected) = shortest_remaining(processes, now) else {
                now = pending;
                continue;
            };

            let run_start = match running {
                Some((current, start)) if current == selected => start,
                Some((current, start)) => {
                    log::trace!(
                        "{} preempts {} at {now}",
                        processes[selected].pid,
                        processes[current].pid
                    );
                    schedule.push(processes[current].pid.clone(), start, now);
                    now
                }
                None => now,
            };
            running = Some((selected, run_start));
            processes[selected].mark_started(now);

            let completion = now + processes[selected].remaining_time;
            let next_event = match next_arrival_after(processes, now) {
                Some(arrival) => arrival.min(completion),
                None => completion,
            };

            processes[selected].run_for(next_event - now);
            now = next_event;

            if processes[selected].is_finished() {
                processes[selected].complete_at(now);
                schedule.push(processes[selected].pid.clone(), run_start, now);
                running = None;
            }
        }

        Ok(schedule)
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Arrived, unfinished process with the least remaining time.
fn shortest_remaining(processes: &[Process], now: i64) -> Option<usize> {
    processes
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_finished() && p.has_arrived(now))
        .min_by_key(|(_, p)| p.remaining_time)
        .map(|(i, _)| i)
}

/// First arrival strictly after `now`.
fn next_arrival_after(processes: &[Process], now: i64) -> Option<i64> {
    processes
        .iter()
        .filter(|p| !p.is_finished() && p.arrival_time > now)
        .map(|p| p.arrival_time)
        .min()
}
