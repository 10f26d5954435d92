//! Schedule quality metrics (KPIs).
//!
//! Computes standard CPU scheduling indicators from a completed schedule
//! and its processes.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion time |
//! | Avg Waiting | Mean of turnaround - burst |
//! | Avg Turnaround | Mean of completion - arrival |
//! | Avg Response | Mean of first run - arrival |
//! | CPU Utilization | Busy cycles / makespan |
//! | Idle Time | Makespan - busy cycles |
//! | Context Switches | Adjacent intervals with different pids |
//! | Throughput | Completed processes / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use crate::models::{Process, Schedule};

/// Scheduling performance indicators. Times are in cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Latest completion time.
    pub makespan: i64,
    /// Mean waiting time over completed processes.
    pub avg_waiting_time: f64,
    /// Mean turnaround time over completed processes.
    pub avg_turnaround_time: f64,
    /// Mean response time over started processes.
    pub avg_response_time: f64,
    /// Largest single waiting time.
    pub max_waiting_time: i64,
    /// Busy fraction of `[0, makespan)` (0.0..1.0).
    pub cpu_utilization: f64,
    /// Cycles the CPU spent idle before the makespan.
    pub idle_time: i64,
    /// Number of process switches.
    pub context_switches: usize,
    /// Completed processes per cycle.
    pub throughput: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and the processes it ran.
    pub fn calculate(schedule: &Schedule, processes: &[Process]) -> Self {
        let makespan = schedule.makespan();
        let busy = schedule.busy_time();

        let waits: Vec<i64> = processes.iter().filter_map(|p| p.waiting_time).collect();
        let turnarounds: Vec<i64> = processes.iter().filter_map(|p| p.turnaround_time).collect();
        let responses: Vec<i64> = processes.iter().filter_map(|p| p.response_time()).collect();

        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                busy as f64 / makespan as f64,
                turnarounds.len() as f64 / makespan as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            makespan,
            avg_waiting_time: mean(&waits),
            avg_turnaround_time: mean(&turnarounds),
            avg_response_time: mean(&responses),
            max_waiting_time: waits.iter().copied().max().unwrap_or(0),
            cpu_utilization,
            idle_time: makespan - busy,
            context_switches: schedule.context_switches(),
            throughput,
        }
    }
}

fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(pid: &str, burst: i64, arrival: i64, start: i64, completion: i64) -> Process {
        let mut p = Process::new(pid, burst, arrival);
        p.mark_started(start);
        p.complete_at(completion);
        p
    }

    #[test]
    fn test_kpi_basic() {
        let mut schedule = Schedule::new();
        schedule.push("P1", 0, 5);
        schedule.push("P2", 5, 8);
        schedule.push("P3", 8, 9);
        let processes = vec![
            completed("P1", 5, 0, 0, 5),
            completed("P2", 3, 1, 5, 8),
            completed("P3", 1, 2, 8, 9),
        ];

        let kpi = ScheduleKpi::calculate(&schedule, &processes);
        assert_eq!(kpi.makespan, 9);
        // waits 0, 4, 6
        assert!((kpi.avg_waiting_time - 10.0 / 3.0).abs() < 1e-10);
        // turnarounds 5, 7, 7
        assert!((kpi.avg_turnaround_time - 19.0 / 3.0).abs() < 1e-10);
        assert_eq!(kpi.max_waiting_time, 6);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
        assert_eq!(kpi.idle_time, 0);
        assert_eq!(kpi.context_switches, 2);
        assert!((kpi.throughput - 3.0 / 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_idle_time() {
        let mut schedule = Schedule::new();
        schedule.push("P1", 0, 2);
        schedule.push("P2", 6, 8);
        let processes = vec![completed("P1", 2, 0, 0, 2), completed("P2", 2, 6, 6, 8)];

        let kpi = ScheduleKpi::calculate(&schedule, &processes);
        assert_eq!(kpi.idle_time, 4);
        assert!((kpi.cpu_utilization - 0.5).abs() < 1e-10);
        assert!((kpi.avg_response_time - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Schedule::new(), &[]);
        assert_eq!(kpi.makespan, 0);
        assert!((kpi.avg_waiting_time - 0.0).abs() < 1e-10);
        assert!((kpi.throughput - 0.0).abs() < 1e-10);
    }
}
