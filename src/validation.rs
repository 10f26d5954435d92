//! Input validation for simulation runs.
//!
//! Checks structural integrity of processes, resources, and actions
//! before an engine runs. Detects:
//! - Empty input
//! - Empty, malformed, or duplicate identifiers
//! - Out-of-range numeric fields
//! - Actions referencing unknown resources or processes
//!
//! All checks run to completion so a caller sees every problem at once.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Action, Process, Resource, HOLD_CYCLES};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
    /// 1-based source line, when the input came from text.
    pub line: Option<usize>,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Nothing to simulate.
    EmptyInput,
    /// An identifier is empty.
    EmptyId,
    /// An identifier contains characters outside `[A-Za-z0-9_-]`.
    InvalidId,
    /// Two entities share the same identifier.
    DuplicateId,
    /// A burst time is zero or negative.
    NonPositiveBurst,
    /// An arrival time is negative.
    NegativeArrival,
    /// A priority is negative.
    NegativePriority,
    /// A resource count is zero or negative.
    NonPositiveCount,
    /// An action cycle is negative.
    NegativeCycle,
    /// An action references a resource that doesn't exist.
    InvalidResourceReference,
    /// An action references a process that doesn't exist.
    InvalidProcessReference,
    /// An action type is neither READ nor WRITE.
    InvalidActionType,
    /// A text record has too few fields or a non-integer field.
    MalformedRecord,
    /// The input source could not be read.
    Unreadable,
    /// Simulated time would exceed the representable range of cycles.
    HorizonOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
        }
    }

    pub(crate) fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Whether `id` matches `[A-Za-z0-9_-]+`.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validates scheduling input.
///
/// Checks:
/// 1. At least one process
/// 2. Non-empty, well-formed, unique pids
/// 3. Positive burst times
/// 4. Non-negative arrival times and priorities
/// 5. Latest arrival plus total burst fits in an `i64` cycle count
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "Process list cannot be empty",
        ));
    }

    let mut pids = HashSet::new();
    for (i, p) in processes.iter().enumerate() {
        if p.pid.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Process #{i} has an empty pid"),
            ));
            continue;
        }
        if !is_valid_identifier(&p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                format!("Process pid '{}' contains invalid characters", p.pid),
            ));
        }
        if !pids.insert(p.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process pid: {}", p.pid),
            ));
        }
        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}': burst time must be positive, got {}", p.pid, p.burst_time),
            ));
        }
        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}': arrival time cannot be negative, got {}",
                    p.pid, p.arrival_time
                ),
            ));
        }
        if p.priority < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePriority,
                format!("Process '{}': priority cannot be negative, got {}", p.pid, p.priority),
            ));
        }
    }

    // No single-CPU schedule ends later than the last arrival plus all work.
    let last_arrival = processes.iter().map(|p| p.arrival_time.max(0)).max();
    let horizon = processes
        .iter()
        .try_fold(last_arrival.unwrap_or(0), |t, p| t.checked_add(p.burst_time.max(0)));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Latest arrival plus total burst time overflows the cycle range",
        ));
    }

    finish(errors)
}

/// Validates synchronization input.
///
/// Checks:
/// 1. At least one action
/// 2. Unique, well-formed resource names with positive counts
/// 3. Non-negative action cycles
/// 4. Every action resource exists
/// 5. Every action pid exists, when a process list is supplied
/// 6. The latest cycle leaves room for every hold and hand-off
pub fn validate_sync_input(
    processes: &[Process],
    resources: &[Resource],
    actions: &[Action],
) -> ValidationResult {
    let mut errors = Vec::new();

    if actions.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "Action list cannot be empty",
        ));
    }

    let mut names = HashSet::new();
    for r in resources {
        if !is_valid_identifier(&r.name) {
            errors.push(ValidationError::new(
                if r.name.is_empty() {
                    ValidationErrorKind::EmptyId
                } else {
                    ValidationErrorKind::InvalidId
                },
                format!("Invalid resource name: '{}'", r.name),
            ));
        }
        if !names.insert(r.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource name: {}", r.name),
            ));
        }
        if r.count <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCount,
                format!("Resource '{}': count must be positive, got {}", r.name, r.count),
            ));
        }
    }

    let pids: HashSet<&str> = processes.iter().map(|p| p.pid.as_str()).collect();

    for (i, a) in actions.iter().enumerate() {
        if a.pid.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Action #{i} has an empty pid"),
            ));
        } else if !pids.is_empty() && !pids.contains(a.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProcessReference,
                format!("Action #{i} references unknown process '{}'", a.pid),
            ));
        }
        if a.cycle < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeCycle,
                format!("Action #{i}: cycle cannot be negative, got {}", a.cycle),
            ));
        }
        if !names.contains(a.resource.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResourceReference,
                format!("Action #{i} ('{}') references unknown resource '{}'", a.pid, a.resource),
            ));
        }
    }

    // Each action adds at most one hold and one hand-off after the last cycle.
    let last_cycle = actions.iter().map(|a| a.cycle.max(0)).max().unwrap_or(0);
    let horizon = i64::try_from(actions.len())
        .ok()
        .and_then(|n| n.checked_mul(2)?.checked_add(1)?.checked_mul(HOLD_CYCLES))
        .and_then(|span| last_cycle.checked_add(span));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            format!("Action cycle {last_cycle} leaves no room for the run's holds"),
        ));
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        for e in &errors {
            log::warn!("rejected input: {e}");
        }
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<Process> {
        vec![
            Process::new("P1", 5, 0),
            Process::new("P2", 3, 1).with_priority(2),
        ]
    }

    fn sample_resources() -> Vec<Resource> {
        vec![Resource::new("R1", 1), Resource::new("R2", 2)]
    }

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        result.unwrap_err().iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_processes() {
        assert!(validate_processes(&sample_processes()).is_ok());
    }

    #[test]
    fn test_empty_processes() {
        assert!(has_kind(validate_processes(&[]), ValidationErrorKind::EmptyInput));
    }

    #[test]
    fn test_duplicate_pid() {
        let procs = vec![Process::new("P1", 1, 0), Process::new("P1", 2, 0)];
        assert!(has_kind(validate_processes(&procs), ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_empty_and_invalid_pid() {
        let procs = vec![Process::new("", 1, 0), Process::new("P 2", 1, 0)];
        let errors = validate_processes(&procs).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyId));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidId));
    }

    #[test]
    fn test_numeric_ranges() {
        let procs = vec![
            Process::new("P1", 0, 0),
            Process::new("P2", 1, -1),
            Process::new("P3", 1, 0).with_priority(-4),
        ];
        let errors = validate_processes(&procs).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::NonPositiveBurst));
        assert!(kinds.contains(&ValidationErrorKind::NegativeArrival));
        assert!(kinds.contains(&ValidationErrorKind::NegativePriority));
    }

    #[test]
    fn test_identifier_rule() {
        assert!(is_valid_identifier("P_1-a"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("P.1"));
    }

    #[test]
    fn test_valid_sync_input() {
        let actions = vec![Action::read("P1", "R1", 0), Action::write("P2", "R2", 1)];
        assert!(validate_sync_input(&sample_processes(), &sample_resources(), &actions).is_ok());
    }

    #[test]
    fn test_unknown_resource() {
        let actions = vec![Action::read("P1", "NOPE", 0)];
        let errors =
            validate_sync_input(&sample_processes(), &sample_resources(), &actions).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidResourceReference);
        assert!(errors[0].message.contains("NOPE"));
    }

    #[test]
    fn test_unknown_process_only_checked_with_process_list() {
        let actions = vec![Action::read("P9", "R1", 0)];
        assert!(has_kind(
            validate_sync_input(&sample_processes(), &sample_resources(), &actions),
            ValidationErrorKind::InvalidProcessReference
        ));
        assert!(validate_sync_input(&[], &sample_resources(), &actions).is_ok());
    }

    #[test]
    fn test_bad_resources_and_cycles() {
        let resources = vec![Resource::new("R1", 0), Resource::new("R1", 1)];
        let actions = vec![Action::read("P1", "R1", -2)];
        let errors = validate_sync_input(&[], &resources, &actions).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::NonPositiveCount));
        assert!(kinds.contains(&ValidationErrorKind::DuplicateId));
        assert!(kinds.contains(&ValidationErrorKind::NegativeCycle));
    }

    #[test]
    fn test_empty_actions() {
        assert!(has_kind(
            validate_sync_input(&[], &sample_resources(), &[]),
            ValidationErrorKind::EmptyInput
        ));
    }

    #[test]
    fn test_horizon_overflow() {
        let procs = vec![Process::new("A", i64::MAX, 1)];
        assert!(has_kind(validate_processes(&procs), ValidationErrorKind::HorizonOverflow));

        // Each fits alone; together they exceed the range.
        let half = i64::MAX / 2 + 1;
        let procs = vec![Process::new("A", half, 0), Process::new("B", half, 0)];
        assert!(has_kind(validate_processes(&procs), ValidationErrorKind::HorizonOverflow));

        assert!(validate_processes(&[Process::new("A", i64::MAX - 1, 1)]).is_ok());

        let actions = vec![Action::read("P1", "R1", i64::MAX)];
        assert!(has_kind(
            validate_sync_input(&[], &sample_resources(), &actions),
            ValidationErrorKind::HorizonOverflow
        ));
    }

    #[test]
    fn test_line_in_display() {
        let e = ValidationError::new(ValidationErrorKind::MalformedRecord, "bad").at_line(7);
        assert_eq!(e.to_string(), "line 7: bad");
    }
}
