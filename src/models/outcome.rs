//! Allocation outcome records.
//!
//! Append-only logs produced by a run: one `AssignmentRecord` per placed
//! session (lab/virtual sessions carry a null room for reporting symmetry),
//! one `UnresolvedError` per session or group that exhausted every strategy,
//! and one `GroupSplit` per group whose week was divided across two rooms.
//! Only the optimizer removes error entries, and only when it repairs the
//! group; nothing else retracts a record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{GroupId, RoomId, SessionId, Weekday};

/// A session placed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// The placed session.
    pub session: SessionId,
    /// Assigned room; `None` for lab/virtual sessions.
    pub room: Option<RoomId>,
    /// Human-readable placement note.
    pub note: String,
}

impl AssignmentRecord {
    /// Record for a session placed in a room.
    pub fn placed(session: SessionId, room: impl Into<RoomId>, note: impl Into<String>) -> Self {
        Self {
            session,
            room: Some(room.into()),
            note: note.into(),
        }
    }

    /// Record for a session that bypasses room allocation.
    pub fn roomless(session: SessionId, note: impl Into<String>) -> Self {
        Self {
            session,
            room: None,
            note: note.into(),
        }
    }
}

/// Why a session or group remained unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// Every strategy in the cascade failed to find a room.
    NoRoomAvailable,
    /// No room was available for one specific day of the week.
    NoRoomForDay(Weekday),
    /// The group is in the priority set and no accessible-floor room was free.
    PriorityFloorUnavailable,
    /// Evaluating the group failed on malformed data; the message
    /// distinguishes the cause.
    Evaluation(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoRoomAvailable => f.write_str("no room available"),
            UnresolvedReason::NoRoomForDay(day) => write!(f, "no room available on {day}"),
            UnresolvedReason::PriorityFloorUnavailable => {
                f.write_str("no accessible-floor room available for priority group")
            }
            UnresolvedReason::Evaluation(msg) => write!(f, "evaluation failed: {msg}"),
        }
    }
}

impl UnresolvedReason {
    /// Whether the optimizer may retry this failure.
    ///
    /// Only plain no-room failures are retried; evaluation failures would
    /// fail again and priority-floor failures must not be weakened.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UnresolvedReason::NoRoomAvailable | UnresolvedReason::NoRoomForDay(_)
        )
    }
}

/// A session or group that exhausted every strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresolvedError {
    /// Offending session, when the failure is session-scoped.
    pub session: Option<SessionId>,
    /// Owning group.
    pub group_id: GroupId,
    /// Failure reason.
    pub reason: UnresolvedReason,
}

impl UnresolvedError {
    /// Session-scoped failure.
    pub fn for_session(
        session: SessionId,
        group_id: impl Into<GroupId>,
        reason: UnresolvedReason,
    ) -> Self {
        Self {
            session: Some(session),
            group_id: group_id.into(),
            reason,
        }
    }

    /// Group-scoped failure.
    pub fn for_group(group_id: impl Into<GroupId>, reason: UnresolvedReason) -> Self {
        Self {
            session: None,
            group_id: group_id.into(),
            reason,
        }
    }
}

/// A group whose week was divided across two rooms along a contiguous-day
/// boundary. Informational; consumed by reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSplit {
    /// Split group.
    pub group_id: GroupId,
    /// Room serving the first run of days.
    pub room_a: RoomId,
    /// Days served by `room_a`, in day order.
    pub days_a: Vec<Weekday>,
    /// Room serving the second run of days.
    pub room_b: RoomId,
    /// Days served by `room_b`, in day order.
    pub days_b: Vec<Weekday>,
}

/// Summary counts computed from the run logs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// All sessions ingested.
    pub total_sessions: usize,
    /// Sessions routed to room allocation.
    pub in_person: usize,
    /// Sessions classified virtual.
    pub virtual_sessions: usize,
    /// Sessions classified lab.
    pub lab_sessions: usize,
    /// Assignment records with a room.
    pub assigned: usize,
    /// Remaining unresolved errors.
    pub unresolved: usize,
    /// Groups split across two rooms.
    pub splits: usize,
}
