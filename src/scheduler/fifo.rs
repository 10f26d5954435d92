//! First In First Out (non-preemptive).

use super::SchedulingPolicy;
use crate::error::SimulationError;
use crate::guard::StepGuard;
use crate::models::{Process, Schedule};

/// First In First Out.
///
/// Runs processes to completion in arrival order; equal arrivals keep
/// input order. The CPU idles until the next arrival when the queue is
/// empty.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl SchedulingPolicy for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn schedule(
        &self,
        processes: &mut [Process],
        guard: &mut StepGuard,
    ) -> Result<Schedule, SimulationError> {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| processes[i].arrival_time);

        let mut schedule = Schedule::new();
        let mut now = 0;

        for i in order {
            guard.tick()?;
            let p = &mut processes[i];
            now = now.max(p.arrival_time);
            let end = now + p.remaining_time;

            p.mark_started(now);
            p.run_for(p.remaining_time);
            p.complete_at(end);
            schedule.push(p.pid.clone(), now, end);
            now = end;
        }

        Ok(schedule)
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}
