//! Run state shared by both synchronization disciplines.
//!
//! Tracks active holds, performs acquire attempts, and releases expired
//! holds in time order, chaining hand-offs to queued processes.
//!
//! # Hold model
//! Every access (direct or handed off) holds one slot for exactly one
//! cycle. A hold that ends at `t` is released at `t`; if a process is
//! queued on that resource, it receives the slot at `t` (a `GRANTED`
//! event over `[t, t+1)`) and its oldest waiting action becomes
//! `Accessed`.

use std::collections::{HashMap, VecDeque};

use crate::error::{SimulationError, SimulationErrorKind};
use crate::guard::StepGuard;
use crate::models::{Action, ActionState, EventLabel, Resource, Timeline, HOLD_CYCLES};

/// A slot held by `pid` until `release_at`.
#[derive(Debug, Clone)]
struct Hold {
    resource: usize,
    pid: String,
    release_at: i64,
    seq: u64,
}

/// Mutable state of one synchronization run.
#[derive(Debug)]
pub struct SyncState {
    pub(crate) resources: Vec<Resource>,
    pub(crate) actions: Vec<Action>,
    pub(crate) timeline: Timeline,
    index: HashMap<String, usize>,
    holds: Vec<Hold>,
    next_seq: u64,
    /// Waiting action indices per (resource, pid), oldest first.
    pending: HashMap<(usize, String), VecDeque<usize>>,
    /// Cap on concurrent holders per resource, below `count` if set.
    holder_limit: Option<i32>,
    guard: StepGuard,
}

impl SyncState {
    /// Builds run state. Inputs must already be validated.
    pub(crate) fn new(resources: Vec<Resource>, actions: Vec<Action>, guard: StepGuard) -> Self {
        let index = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
        Self {
            resources,
            actions,
            timeline: Timeline::new(),
            index,
            holds: Vec::new(),
            next_seq: 0,
            pending: HashMap::new(),
            holder_limit: None,
            guard,
        }
    }

    /// Caps every resource at `limit` concurrent holders, whatever its
    /// `count`. Requests beyond the cap queue as if the resource were full.
    pub fn limit_holders(&mut self, limit: i32) {
        self.holder_limit = Some(limit);
    }

    /// Action indices sorted by cycle, input order on ties.
    pub fn cycle_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.actions.len()).collect();
        order.sort_by_key(|&i| self.actions[i].cycle);
        order
    }

    /// Action indices grouped by cycle, groups ascending, input order
    /// within a group.
    pub fn cycle_batches(&self) -> Vec<(i64, Vec<usize>)> {
        let mut batches: Vec<(i64, Vec<usize>)> = Vec::new();
        for idx in self.cycle_order() {
            let cycle = self.actions[idx].cycle;
            match batches.last_mut() {
                Some((c, batch)) if *c == cycle => batch.push(idx),
                _ => batches.push((cycle, vec![idx])),
            }
        }
        batches
    }

    /// Cycle at which action `idx` is issued.
    pub fn cycle_of(&self, idx: usize) -> i64 {
        self.actions[idx].cycle
    }

    /// Number of holds not yet released.
    pub fn active_holds(&self) -> usize {
        self.holds.len()
    }

    /// Charges one step against the run budget.
    pub fn tick(&mut self) -> Result<(), SimulationError> {
        self.guard.tick()
    }

    /// Attempts action `idx` at `now`.
    ///
    /// On success the action becomes `Accessed` and holds a slot until
    /// `now + HOLD_CYCLES`; otherwise it stays `Waiting` and its pid is
    /// queued on the resource. Either way one event is recorded.
    pub fn attempt(&mut self, idx: usize, now: i64) -> Result<bool, SimulationError> {
        let resource = self.resource_index(&self.actions[idx].resource)?;
        let action = &mut self.actions[idx];
        let label = EventLabel::Request(action.action_type);

        let slots = &mut self.resources[resource];
        let limit = self.holder_limit.unwrap_or(slots.count);
        let acquired = slots.acquire_within(&action.pid, limit);
        if acquired {
            action.grant();
            log::trace!("{} acquires {} at {now}", action.pid, action.resource);
            self.timeline.record(
                action.pid.clone(),
                label,
                action.resource.clone(),
                now,
                ActionState::Accessed,
            );
            let pid = action.pid.clone();
            self.hold(resource, pid, now);
        } else {
            action.state = ActionState::Waiting;
            log::trace!("{} waits for {} at {now}", action.pid, action.resource);
            self.timeline.record(
                action.pid.clone(),
                label,
                action.resource.clone(),
                now,
                ActionState::Waiting,
            );
            self.pending
                .entry((resource, action.pid.clone()))
                .or_default()
                .push_back(idx);
        }

        self.check(resource)?;
        Ok(acquired)
    }

    /// Releases, in time order, every hold ending at or before `until`.
    ///
    /// Hand-offs start new holds that are released in the same sweep if
    /// they also end by `until`. Returns the time of the last release, if
    /// any happened.
    pub fn release_until(&mut self, until: i64) -> Result<Option<i64>, SimulationError> {
        let mut last = None;

        while let Some(pos) = self.next_due(until) {
            self.guard.tick()?;
            let hold = self.holds.remove(pos);
            let t = hold.release_at;
            last = Some(t);

            if let Some(next) = self.resources[hold.resource].release() {
                self.hand_off(hold.resource, next, t);
            } else {
                log::trace!("{} releases {} at {t}", hold.pid, self.resources[hold.resource].name);
            }
            self.check(hold.resource)?;
        }

        Ok(last)
    }

    /// Releases every remaining hold, chaining hand-offs until quiescent.
    pub fn drain(&mut self) -> Result<Option<i64>, SimulationError> {
        self.release_until(i64::MAX)
    }

    fn hand_off(&mut self, resource: usize, pid: String, t: i64) {
        let name = self.resources[resource].name.clone();
        log::trace!("{name} handed to {pid} at {t}");
        self.timeline
            .record(pid.clone(), EventLabel::Granted, name, t, ActionState::Accessed);

        let key = (resource, pid.clone());
        if let Some(queue) = self.pending.get_mut(&key) {
            if let Some(idx) = queue.pop_front() {
                self.actions[idx].grant();
            }
            // Further failed requests of the same pid wait for another turn.
            if !queue.is_empty() {
                self.resources[resource].waiting.push_back(pid.clone());
            } else {
                self.pending.remove(&key);
            }
        }

        self.hold(resource, pid, t);
    }

    fn hold(&mut self, resource: usize, pid: String, start: i64) {
        self.holds.push(Hold {
            resource,
            pid,
            release_at: start + HOLD_CYCLES,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    fn next_due(&self, until: i64) -> Option<usize> {
        self.holds
            .iter()
            .enumerate()
            .filter(|(_, h)| h.release_at <= until)
            .min_by_key(|(_, h)| (h.release_at, h.seq))
            .map(|(i, _)| i)
    }

    fn resource_index(&self, name: &str) -> Result<usize, SimulationError> {
        self.index.get(name).copied().ok_or_else(|| {
            SimulationError::new(
                SimulationErrorKind::InvariantViolated,
                format!("unknown resource '{name}' reached the engine"),
            )
        })
    }

    fn check(&self, resource: usize) -> Result<(), SimulationError> {
        let r = &self.resources[resource];
        if r.is_consistent() {
            Ok(())
        } else {
            Err(SimulationError::new(
                SimulationErrorKind::InvariantViolated,
                format!("resource '{}' has {} of {} slots available", r.name, r.available, r.count),
            ))
        }
    }
}
