//! Priority scheduling (non-preemptive).

use super::engine::run_non_preemptive;
use super::SchedulingPolicy;
use crate::error::SimulationError;
use crate::guard::StepGuard;
use crate::models::{Process, Schedule};

/// Non-preemptive priority scheduling.
///
/// # Convention
/// **Lower priority value = more urgent.** Among arrived processes the
/// smallest `priority` runs to completion; ties go to the earliest
/// arrival, then to input order.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl SchedulingPolicy for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn schedule(
        &self,
        processes: &mut [Process],
        guard: &mut StepGuard,
    ) -> Result<Schedule, SimulationError> {
        run_non_preemptive(processes, guard, |p| (p.priority, p.arrival_time))
    }

    fn description(&self) -> &'static str {
        "Non-preemptive Priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(processes: &mut [Process]) -> Schedule {
        let mut guard = StepGuard::new(1000);
        Priority.schedule(processes, &mut guard).unwrap()
    }

    #[test]
    fn test_lower_value_runs_first() {
        let mut procs = vec![
            Process::new("low", 2, 0).with_priority(5),
            Process::new("high", 2, 0).with_priority(1),
        ];
        let s = run(&mut procs);
        assert_eq!(s.as_tuples(), vec![("high", 0, 2), ("low", 2, 4)]);
    }

    #[test]
    fn test_only_arrived_processes_compete() {
        let mut procs = vec![
            Process::new("P1", 4, 0).with_priority(9),
            Process::new("P2", 2, 1).with_priority(0),
            Process::new("P3", 1, 2).with_priority(3),
        ];
        let s = run(&mut procs);
        // P1 is alone at t=0 and is never interrupted.
        assert_eq!(s.as_tuples(), vec![("P1", 0, 4), ("P2", 4, 6), ("P3", 6, 7)]);
    }

    #[test]
    fn test_tie_breaks_on_arrival_then_input_order() {
        let mut procs = vec![
            Process::new("first", 5, 0).with_priority(0),
            Process::new("B", 1, 3).with_priority(2),
            Process::new("A", 1, 2).with_priority(2),
            Process::new("C", 1, 2).with_priority(2),
        ];
        let s = run(&mut procs);
        let order: Vec<_> = s.intervals.iter().map(|i| i.pid.as_str()).collect();
        assert_eq!(order, vec!["first", "A", "C", "B"]);
    }

    #[test]
    fn test_idle_gap() {
        let mut procs = vec![Process::new("P1", 1, 0), Process::new("P2", 1, 5).with_priority(0)];
        let s = run(&mut procs);
        assert_eq!(s.as_tuples(), vec![("P1", 0, 1), ("P2", 5, 6)]);
    }
}
