//! Mutex discipline: serialized one-cycle critical sections.
//!
//! # Algorithm
//!
//! Actions are grouped by cycle. For each group:
//!
//! 1. Advance the clock to at least the group's cycle.
//! 2. Every action in the group attempts acquisition at the same clock
//!    value (input order); losers are queued.
//! 3. Run the group's critical sections to completion: release each hold
//!    when it ends and hand the slot to the next queued process, until no
//!    hold remains.
//! 4. Continue from the cycle the last critical section ended.
//!
//! Every resource is exclusive under this discipline: at most one process
//! holds it at a time, whatever its `count`. A single request therefore
//! occupies `[t, t+1)` and pushes the clock to `t+1`; each hand-off adds
//! one more cycle.

use super::{SyncDiscipline, SyncState};
use crate::error::SimulationError;

/// Serialized critical-section access.
#[derive(Debug, Clone, Copy)]
pub struct Mutex;

impl SyncDiscipline for Mutex {
    fn name(&self) -> &'static str {
        "MUTEX"
    }

    fn run(&self, state: &mut SyncState) -> Result<(), SimulationError> {
        let mut now = 0;
        state.limit_holders(1);

        for (cycle, batch) in state.cycle_batches() {
            now = now.max(cycle);
            for idx in batch {
                state.tick()?;
                state.attempt(idx, now)?;
            }
            let finished = state.drain()?;
            now = finished.map_or(now + 1, |t| t.max(now + 1));
        }

        Ok(())
    }
}
