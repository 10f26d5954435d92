//! Resource request (action) model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of access requested. Informational: both kinds contend alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Read,
    Write,
}

/// Lifecycle of an action: `Waiting` until granted, then `Accessed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionState {
    #[default]
    Waiting,
    Accessed,
}

/// A request by `pid` for one slot of `resource`, issued at `cycle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Requesting process.
    pub pid: String,
    /// Access kind.
    pub action_type: ActionType,
    /// Name of the requested resource.
    pub resource: String,
    /// Earliest cycle the request is issued.
    pub cycle: i64,
    /// Current state; always starts as `Waiting`.
    pub state: ActionState,
}

impl Action {
    /// Creates a waiting action.
    pub fn new(
        pid: impl Into<String>,
        action_type: ActionType,
        resource: impl Into<String>,
        cycle: i64,
    ) -> Self {
        Self {
            pid: pid.into(),
            action_type,
            resource: resource.into(),
            cycle,
            state: ActionState::Waiting,
        }
    }

    /// Shorthand for a read request.
    pub fn read(pid: impl Into<String>, resource: impl Into<String>, cycle: i64) -> Self {
        Self::new(pid, ActionType::Read, resource, cycle)
    }

    /// Shorthand for a write request.
    pub fn write(pid: impl Into<String>, resource: impl Into<String>, cycle: i64) -> Self {
        Self::new(pid, ActionType::Write, resource, cycle)
    }

    /// Marks the action as granted. `Accessed` is terminal.
    pub fn grant(&mut self) {
        self.state = ActionState::Accessed;
    }

    /// Whether access was granted.
    pub fn is_accessed(&self) -> bool {
        self.state == ActionState::Accessed
    }
}

impl ActionType {
    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Read => "READ",
            ActionType::Write => "WRITE",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "READ" => Ok(ActionType::Read),
            "WRITE" => Ok(ActionType::Write),
            other => Err(format!("unknown action type '{other}' (expected READ or WRITE)")),
        }
    }
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionState::Waiting => "WAITING",
            ActionState::Accessed => "ACCESSED",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_action_is_waiting() {
        let a = Action::read("P1", "R1", 3);
        assert_eq!(a.state, ActionState::Waiting);
        assert_eq!(a.action_type, ActionType::Read);
        assert!(!a.is_accessed());
    }

    #[test]
    fn test_grant() {
        let mut a = Action::write("P1", "R1", 0);
        a.grant();
        assert!(a.is_accessed());
    }

    #[test]
    fn test_action_type_parsing() {
        assert_eq!("read".parse::<ActionType>(), Ok(ActionType::Read));
        assert_eq!(" WRITE ".parse::<ActionType>(), Ok(ActionType::Write));
        assert!("DELETE".parse::<ActionType>().is_err());
        assert_eq!(ActionType::Write.to_string(), "WRITE");
    }
}
