//! Line-oriented text loaders for processes, resources, and actions.
//!
//! # Format
//!
//! One record per line, comma-separated, fields trimmed. Blank lines and
//! lines starting with `#` are skipped. Extra trailing fields are ignored.
//!
//! ```text
//! # pid, burst, arrival, priority
//! P1, 5, 0, 1
//!
//! # name, count
//! R1, 2
//!
//! # pid, READ|WRITE, resource, cycle
//! P1, READ, R1, 0
//! ```
//!
//! Parsing stops at the first bad line; the error carries its 1-based line
//! number. Cross-file references (action → resource, action → pid) are not
//! checked here; the synchronizer validates them before a run.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use crate::error::SimResult;
use crate::models::{Action, ActionType, Process, Resource};
use crate::validation::{is_valid_identifier, ValidationError, ValidationErrorKind};

/// Parses process records `pid, burst, arrival, priority`.
pub fn parse_processes(text: &str) -> SimResult<Vec<Process>> {
    let mut seen = HashSet::new();
    parse_records(text, 4, "process", |fields| {
        let pid = identifier(fields[0], "PID")?;
        let burst: i64 = integer(fields[1], "burst time")?;
        if burst <= 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("burst time must be positive, got {burst}"),
            ));
        }
        let arrival: i64 = integer(fields[2], "arrival time")?;
        if arrival < 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("arrival time cannot be negative, got {arrival}"),
            ));
        }
        let priority: i32 = integer(fields[3], "priority")?;
        if priority < 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NegativePriority,
                format!("priority cannot be negative, got {priority}"),
            ));
        }
        unique(&mut seen, pid, "PID")?;
        Ok(Process::new(pid, burst, arrival).with_priority(priority))
    })
}

/// Parses resource records `name, count`.
pub fn parse_resources(text: &str) -> SimResult<Vec<Resource>> {
    let mut seen = HashSet::new();
    parse_records(text, 2, "resource", |fields| {
        let name = identifier(fields[0], "resource name")?;
        let count: i32 = integer(fields[1], "count")?;
        if count <= 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveCount,
                format!("count must be positive, got {count}"),
            ));
        }
        unique(&mut seen, name, "resource name")?;
        Ok(Resource::new(name, count))
    })
}

/// Parses action records `pid, READ|WRITE, resource, cycle`.
pub fn parse_actions(text: &str) -> SimResult<Vec<Action>> {
    parse_records(text, 4, "action", |fields| {
        let pid = identifier(fields[0], "PID")?;
        let action_type = fields[1]
            .parse::<ActionType>()
            .map_err(|e| ValidationError::new(ValidationErrorKind::InvalidActionType, e))?;
        let resource = identifier(fields[2], "resource name")?;
        let cycle: i64 = integer(fields[3], "cycle")?;
        if cycle < 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NegativeCycle,
                format!("cycle cannot be negative, got {cycle}"),
            ));
        }
        Ok(Action::new(pid, action_type, resource, cycle))
    })
}

/// Reads and parses a process file.
pub fn load_processes(path: impl AsRef<Path>) -> SimResult<Vec<Process>> {
    parse_processes(&read(path.as_ref())?)
}

/// Reads and parses a resource file.
pub fn load_resources(path: impl AsRef<Path>) -> SimResult<Vec<Resource>> {
    parse_resources(&read(path.as_ref())?)
}

/// Reads and parses an action file.
pub fn load_actions(path: impl AsRef<Path>) -> SimResult<Vec<Action>> {
    parse_actions(&read(path.as_ref())?)
}

fn read(path: &Path) -> Result<String, ValidationError> {
    std::fs::read_to_string(path).map_err(|e| {
        let error = ValidationError::new(
            ValidationErrorKind::Unreadable,
            format!("cannot read {}: {e}", path.display()),
        );
        log::warn!("rejected input: {error}");
        error
    })
}

/// Runs `parse` on the fields of every record line.
fn parse_records<T, F>(text: &str, fields: usize, what: &str, mut parse: F) -> SimResult<Vec<T>>
where
    F: FnMut(&[&str]) -> Result<T, ValidationError>,
{
    let mut records = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let result = if parts.len() < fields {
            Err(ValidationError::new(
                ValidationErrorKind::MalformedRecord,
                format!(
                    "expected {fields} fields for a {what} record, found {}",
                    parts.len()
                ),
            ))
        } else {
            parse(&parts)
        };

        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                let e = e.at_line(i + 1);
                log::warn!("rejected input: {e}");
                return Err(e.into());
            }
        }
    }

    if records.is_empty() {
        let e = ValidationError::new(
            ValidationErrorKind::EmptyInput,
            format!("no {what} records found"),
        );
        log::warn!("rejected input: {e}");
        return Err(e.into());
    }

    log::debug!("parsed {} {what} records", records.len());
    Ok(records)
}

fn identifier<'a>(field: &'a str, what: &str) -> Result<&'a str, ValidationError> {
    if field.is_empty() {
        Err(ValidationError::new(
            ValidationErrorKind::EmptyId,
            format!("{what} cannot be empty"),
        ))
    } else if !is_valid_identifier(field) {
        Err(ValidationError::new(
            ValidationErrorKind::InvalidId,
            format!("{what} '{field}' contains invalid characters"),
        ))
    } else {
        Ok(field)
    }
}

fn integer<T: FromStr>(field: &str, what: &str) -> Result<T, ValidationError> {
    field.parse().map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::MalformedRecord,
            format!("{what} must be an integer, got '{field}'"),
        )
    })
}

fn unique(seen: &mut HashSet<String>, id: &str, what: &str) -> Result<(), ValidationError> {
    if seen.insert(id.to_string()) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            format!("duplicate {what} '{id}'"),
        ))
    }
}
