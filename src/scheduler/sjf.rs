//! Shortest Job First (non-preemptive).

use super::engine::run_non_preemptive;
use super::SchedulingPolicy;
use crate::error::SimulationError;
use crate::guard::StepGuard;
use crate::models::{Process, Schedule};

/// Shortest Job First.
///
/// Whenever the CPU is free, runs the arrived process with the smallest
/// burst time to completion. Ties go to the first process in input order.
///
/// # Reference
/// Smith (1956), shortest processing time minimizes mean flow time.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn schedule(
        &self,
        processes: &mut [Process],
        guard: &mut StepGuard,
    ) -> Result<Schedule, SimulationError> {
        run_non_preemptive(processes, guard, |p| p.burst_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(processes: &mut [Process]) -> Schedule {
        let mut guard = StepGuard::new(1000);
        Sjf.schedule(processes, &mut guard).unwrap()
    }

    #[test]
    fn test_sjf_picks_shortest_arrived() {
        let mut procs = vec![
            Process::new("P1", 5, 0),
            Process::new("P2", 3, 1),
            Process::new("P3", 1, 2),
        ];
        let s = run(&mut procs);
        // P1 alone at t=0; P3 (1) beats P2 (3) at t=5.
        assert_eq!(s.as_tuples(), vec![("P1", 0, 5), ("P3", 5, 6), ("P2", 6, 9)]);
        assert_eq!(procs[1].waiting_time, Some(5));
        assert_eq!(procs[2].waiting_time, Some(3));
    }

    #[test]
    fn test_sjf_tie_input_order() {
        let mut procs = vec![
            Process::new("A", 2, 0),
            Process::new("B", 2, 0),
            Process::new("C", 2, 0),
        ];
        let s = run(&mut procs);
        let order: Vec<_> = s.intervals.iter().map(|i| i.pid.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sjf_jumps_to_next_arrival() {
        let mut procs = vec![Process::new("late", 1, 10), Process::new("later", 1, 20)];
        let s = run(&mut procs);
        assert_eq!(s.as_tuples(), vec![("late", 10, 11), ("later", 20, 21)]);
    }

    #[test]
    fn test_sjf_is_non_preemptive() {
        let mut procs = vec![Process::new("long", 10, 0), Process::new("short", 1, 1)];
        let s = run(&mut procs);
        assert_eq!(s.as_tuples(), vec![("long", 0, 10), ("short", 10, 11)]);
    }
}
