//! Counting semaphore discipline: overlapping holds up to `count`.
//!
//! # Algorithm
//!
//! For each action in cycle order (input order on ties):
//!
//! 1. Advance the clock to at least the action's cycle.
//! 2. Release every hold that has ended by now, in end order, handing freed
//!    slots to queued processes (`GRANTED`).
//! 3. Attempt the action's own acquisition.
//!
//! Unlike [`Mutex`](super::Mutex), the clock follows request cycles only;
//! holds run concurrently with later requests. After the last action all
//! remaining holds are drained so every queued process is served.

use super::{SyncDiscipline, SyncState};
use crate::error::SimulationError;

/// Counting semaphore.
#[derive(Debug, Clone, Copy)]
pub struct Semaphore;

impl SyncDiscipline for Semaphore {
    fn name(&self) -> &'static str {
        "SEMAPHORE"
    }

    fn run(&self, state: &mut SyncState) -> Result<(), SimulationError> {
        let mut now = 0;

        for idx in state.cycle_order() {
            state.tick()?;
            now = now.max(state.cycle_of(idx));
            state.release_until(now)?;
            state.attempt(idx, now)?;
        }

        state.drain()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::StepGuard;
    use crate::models::{Action, ActionState, EventLabel, Resource};

    fn run(resources: Vec<Resource>, actions: Vec<Action>) -> SyncState {
        let mut state = SyncState::new(resources, actions, StepGuard::new(1000));
        Semaphore.run(&mut state).unwrap();
        state
    }

    #[test]
    fn test_concurrent_holders_up_to_count() {
        let s = run(
            vec![Resource::new("R", 2)],
            vec![
                Action::read("P1", "R", 0),
                Action::read("P2", "R", 0),
                Action::write("P3", "R", 0),
            ],
        );
        let t = s.timeline.as_tuples();
        assert_eq!(t[0], ("P1", "READ".to_string(), 0, 1, ActionState::Accessed));
        assert_eq!(t[1], ("P2", "READ".to_string(), 0, 1, ActionState::Accessed));
        assert_eq!(t[2], ("P3", "WRITE".to_string(), 0, 1, ActionState::Waiting));
        assert_eq!(t[3], ("P3", "GRANTED".to_string(), 1, 2, ActionState::Accessed));
        assert_eq!(s.timeline.peak_holders("R"), 2);
        assert!(s.resources[0].is_quiescent());
    }

    #[test]
    fn test_holds_overlap_later_requests() {
        let s = run(
            vec![Resource::exclusive("R")],
            vec![
                Action::read("A", "R", 0),
                Action::read("B", "R", 0),
                Action::read("C", "R", 1),
            ],
        );
        assert_eq!(
            s.timeline.as_tuples(),
            vec![
                ("A", "READ".to_string(), 0, 1, ActionState::Accessed),
                ("B", "READ".to_string(), 0, 1, ActionState::Waiting),
                ("B", "GRANTED".to_string(), 1, 2, ActionState::Accessed),
                ("C", "READ".to_string(), 1, 2, ActionState::Waiting),
                ("C", "GRANTED".to_string(), 2, 3, ActionState::Accessed),
            ]
        );
        assert!(s.actions.iter().all(|a| a.is_accessed()));
    }

    #[test]
    fn test_expired_hold_frees_slot_before_request() {
        let s = run(
            vec![Resource::exclusive("R")],
            vec![Action::read("A", "R", 0), Action::read("B", "R", 1)],
        );
        assert_eq!(s.timeline.wait_count(), 0);
        assert_eq!(s.timeline.events[1].start, 1);
    }

    #[test]
    fn test_hand_off_at_hold_end_not_at_next_request() {
        let s = run(
            vec![Resource::exclusive("R")],
            vec![
                Action::read("A", "R", 0),
                Action::read("B", "R", 0),
                Action::read("C", "R", 9),
            ],
        );
        let granted = s
            .timeline
            .events
            .iter()
            .find(|e| e.label == EventLabel::Granted)
            .unwrap();
        assert_eq!((granted.pid.as_str(), granted.start), ("B", 1));
        assert_eq!(s.timeline.events.last().unwrap().start, 9);
    }

    #[test]
    fn test_independent_resources() {
        let s = run(
            vec![Resource::exclusive("X"), Resource::exclusive("Y")],
            vec![Action::read("A", "X", 0), Action::write("B", "Y", 0)],
        );
        assert_eq!(s.timeline.wait_count(), 0);
        assert!(s.resources.iter().all(|r| r.is_quiescent()));
    }
}
