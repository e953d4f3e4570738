//! Class session model.
//!
//! A session is one weekly-recurring meeting of a group: a subject taught on
//! a fixed weekday and time range. Sessions are created once during
//! ingestion; `assigned_room` is the only field the allocator mutates.

use serde::{Deserialize, Serialize};

use super::{GroupId, RoomId, TimeInterval, TimeOfDay, Weekday};

/// Index of a session within a run's session list.
pub type SessionId = usize;

/// Declared teaching modality of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Modality {
    /// Taught in a physical room.
    #[default]
    InPerson,
    /// Taught online; never consumes a room.
    Virtual,
    /// Taught in a dedicated lab; never consumes a general room.
    Lab,
}

/// One weekly-recurring meeting of a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSession {
    /// Owning group.
    pub group_id: GroupId,
    /// Subject code, e.g. `"INF-305"`.
    pub subject_code: String,
    /// Human-readable subject name.
    pub subject_name: String,
    /// Day of the week the session recurs on.
    pub day: Weekday,
    /// Session start.
    pub start: TimeOfDay,
    /// Session end (exclusive).
    pub end: TimeOfDay,
    /// Declared modality.
    pub modality: Modality,
    /// Seats the session needs.
    pub required_capacity: u32,
    /// Room assigned by the allocator, if any.
    pub assigned_room: Option<RoomId>,
}

impl ClassSession {
    /// Creates an in-person session with no assigned room.
    pub fn new(
        group_id: impl Into<GroupId>,
        subject_code: impl Into<String>,
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
        required_capacity: u32,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            subject_code: subject_code.into(),
            subject_name: String::new(),
            day,
            start,
            end,
            modality: Modality::InPerson,
            required_capacity,
            assigned_room: None,
        }
    }

    /// Sets the subject name.
    pub fn with_subject_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self
    }

    /// Sets the modality.
    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    /// The session's time interval, or `None` when `start >= end`.
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.day, self.start, self.end)
    }
}
