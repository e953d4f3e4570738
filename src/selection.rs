//! Room selection heuristic.
//!
//! Filters rooms to candidates that satisfy the hard constraints for a
//! requirement, then ranks them by soft-preference tie-breaks. One search,
//! two policies (the plain first pass and the exhaustive retry differ only
//! in candidate filtering and ranking):
//!
//! - [`SearchPolicy::Strict`]: rooms fixed to another group are excluded;
//!   unclaimed rooms rank above rooms the searching group already holds,
//!   then best capacity fit, then lowest floor.
//! - [`SearchPolicy::Permissive`]: every room is considered, ranked purely
//!   by capacity fit then floor.
//!
//! Priority-set groups are restricted to accessible-floor rooms before
//! ranking. That restriction is a hard override: when it empties the
//! candidate set the attempt reports the floor as unavailable instead of
//! falling back to other floors.

use crate::availability::{check_room, Requirement};
use crate::models::Room;

/// Candidate filtering and ranking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPolicy {
    /// Exclude rooms fixed to another group; prefer unclaimed rooms.
    Strict,
    /// Consider every room; rank purely by capacity fit then floor.
    Permissive,
}

/// Result of a room search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index of the best room in the searched slice.
    Room(usize),
    /// No room passed the hard filters.
    NoCandidate,
    /// Candidates existed, but none on the accessible floor for a
    /// priority-set group.
    PriorityFloorUnavailable,
}

impl Selection {
    /// The selected room index, if any.
    pub fn room(self) -> Option<usize> {
        match self {
            Selection::Room(idx) => Some(idx),
            _ => None,
        }
    }
}

/// Searches `rooms` for the best candidate satisfying `requirement`.
///
/// `student_count` drives the capacity-fit rank; `is_priority` applies the
/// accessible-floor restriction. The ranking is a stable sort over room
/// order, so equal-ranked candidates resolve to the lowest room index —
/// deterministic for a fixed inventory.
pub fn search_room(
    rooms: &[Room],
    requirement: &Requirement<'_>,
    student_count: u32,
    is_priority: bool,
    policy: SearchPolicy,
    accessible_floor: u8,
) -> Selection {
    let mut candidates: Vec<usize> = rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| {
            if policy == SearchPolicy::Strict {
                if let Some(fixed) = room.fixed_occupant.as_deref() {
                    if fixed != requirement.group_id {
                        return false;
                    }
                }
            }
            check_room(room, requirement, accessible_floor).is_ok()
        })
        .map(|(idx, _)| idx)
        .collect();

    if candidates.is_empty() {
        return Selection::NoCandidate;
    }

    if is_priority {
        candidates.retain(|&idx| rooms[idx].floor == accessible_floor);
        if candidates.is_empty() {
            return Selection::PriorityFloorUnavailable;
        }
    }

    match policy {
        SearchPolicy::Strict => candidates.sort_by_key(|&idx| {
            let room = &rooms[idx];
            (
                room.fixed_occupant.is_some(),
                room.capacity_slack(student_count),
                room.floor,
            )
        }),
        SearchPolicy::Permissive => candidates.sort_by_key(|&idx| {
            let room = &rooms[idx];
            (room.capacity_slack(student_count), room.floor)
        }),
    }

    Selection::Room(candidates[0])
}
