//! Step budget for engine loops.
//!
//! Every loop that re-selects work (ready-queue draining, shortest-job
//! re-selection, release/hand-off chaining) charges one step per
//! iteration. Exceeding the budget aborts the run with
//! [`SimulationErrorKind::StepLimitExceeded`] instead of hanging.

use crate::error::{SimulationError, SimulationErrorKind};

/// Counts loop iterations against a fixed budget.
#[derive(Debug, Clone)]
pub struct StepGuard {
    limit: usize,
    steps: usize,
}

impl StepGuard {
    /// Creates a guard allowing `limit` steps.
    pub fn new(limit: usize) -> Self {
        Self { limit, steps: 0 }
    }

    /// Budget of `items * steps_per_item` steps.
    pub fn scaled(items: usize, steps_per_item: usize) -> Self {
        Self::new(items.saturating_mul(steps_per_item))
    }

    /// Charges one step.
    pub fn tick(&mut self) -> Result<(), SimulationError> {
        self.steps += 1;
        if self.steps > self.limit {
            return Err(SimulationError::new(
                SimulationErrorKind::StepLimitExceeded,
                format!(
                    "exceeded the limit of {} steps (possible non-terminating run)",
                    self.limit
                ),
            ));
        }
        Ok(())
    }

    /// Steps charged so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step budget.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_budget() {
        let mut g = StepGuard::new(3);
        assert!(g.tick().is_ok());
        assert!(g.tick().is_ok());
        assert!(g.tick().is_ok());
        assert_eq!(g.steps(), 3);
    }

    #[test]
    fn test_exceeding_budget() {
        let mut g = StepGuard::scaled(1, 2);
        g.tick().unwrap();
        g.tick().unwrap();
        let err = g.tick().unwrap_err();
        assert_eq!(err.kind, SimulationErrorKind::StepLimitExceeded);
        assert!(err.message.contains('2'));
    }

    #[test]
    fn test_scaled_saturates() {
        let g = StepGuard::scaled(usize::MAX, 1000);
        assert_eq!(g.limit(), usize::MAX);
    }
}
