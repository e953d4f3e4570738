//! Group (cohort) model.
//!
//! A group is a cohort of students sharing a weekly class schedule. Its
//! scheduling attributes (program, level, sequence) are derived from the
//! group id during ingestion. `student_count` is raised to the maximum
//! capacity requirement seen across the group's sessions while ingesting
//! and is treated as immutable afterwards.

use serde::{Deserialize, Serialize};

/// Group identifier, e.g. `"601"`.
pub type GroupId = String;

/// A cohort of students sharing a weekly schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// Program code, e.g. 200, 400, 900. Zero when not derivable.
    pub program: u32,
    /// Academic level (semester), 1-based. Zero when not derivable.
    pub level: u8,
    /// Sequence number within (program, level). Zero when not derivable.
    pub sequence: u8,
    /// Number of students; the room capacity the group needs.
    pub student_count: u32,
    /// Whether the group must be placed in an accessible room.
    pub requires_accessibility: bool,
}

impl Group {
    /// Creates a group with zeroed derived attributes.
    pub fn new(id: impl Into<GroupId>, student_count: u32) -> Self {
        Self {
            id: id.into(),
            program: 0,
            level: 0,
            sequence: 0,
            student_count,
            requires_accessibility: false,
        }
    }

    /// Sets program, level, and sequence.
    pub fn with_attributes(mut self, program: u32, level: u8, sequence: u8) -> Self {
        self.program = program;
        self.level = level;
        self.sequence = sequence;
        self
    }

    /// Sets the accessibility requirement.
    pub fn with_accessibility(mut self, requires: bool) -> Self {
        self.requires_accessibility = requires;
        self
    }

    /// Raises `student_count` to at least `capacity`. Ingestion-time only.
    pub fn raise_student_count(&mut self, capacity: u32) {
        if capacity > self.student_count {
            self.student_count = capacity;
        }
    }
}
