//! Input validation for allocation runs.
//!
//! Checks structural integrity of rooms, groups, and sessions before
//! allocation. Detects:
//! - Duplicate room ids
//! - Non-positive room capacities
//! - Sessions referencing unknown groups
//! - Empty or inverted session time ranges
//!
//! All issues are collected and returned together; nothing panics.

use std::collections::{BTreeMap, HashSet};

use crate::models::{ClassSession, Group, GroupId, Room};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two rooms share the same id.
    DuplicateRoomId,
    /// A room has zero capacity.
    EmptyRoom,
    /// A session references a group that doesn't exist.
    UnknownGroup,
    /// A session's time range is empty or inverted.
    InvalidTimeRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of an allocation run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(
    rooms: &[Room],
    groups: &BTreeMap<GroupId, Group>,
    sessions: &[ClassSession],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for room in rooms {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoomId,
                format!("Duplicate room id: {}", room.id),
            ));
        }
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRoom,
                format!("Room {} has zero capacity", room.id),
            ));
        }
    }

    for (idx, session) in sessions.iter().enumerate() {
        if !groups.contains_key(&session.group_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownGroup,
                format!(
                    "Session {idx} ({}) references unknown group {}",
                    session.subject_code, session.group_id
                ),
            ));
        }
        if session.start >= session.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!(
                    "Session {idx} ({}) has an empty or inverted time range",
                    session.subject_code
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
