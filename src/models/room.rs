//! Room model.
//!
//! A room is a physical space with a building, floor, capacity, and an
//! accessibility flag. During a run it accumulates occupied intervals, each
//! tagged with the occupying group. `fixed_occupant` records a group
//! committed to the room for its whole week; it steers later ranking but is
//! not an exclusivity lock.

use serde::{Deserialize, Serialize};

use super::{GroupId, TimeInterval};

/// Room identifier, e.g. `"F-101"`.
pub type RoomId = String;

/// One occupied slot: an interval claimed by a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedSlot {
    /// The claimed interval.
    pub interval: TimeInterval,
    /// Group holding the slot.
    pub group_id: GroupId,
}

/// A physical room.
///
/// Invariant: no two entries in `occupied` share a day with overlapping
/// intervals unless they belong to the same group (idempotent re-assignment).
/// [`Room::occupy`] enforces this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier, rendered as `{building}-{floor}{number:02}`.
    pub id: RoomId,
    /// Building name, e.g. `"F"`.
    pub building: String,
    /// Floor number (1-based).
    pub floor: u8,
    /// Numeric room identity within (building, floor).
    pub number: u8,
    /// Seat capacity.
    pub capacity: u32,
    /// Whether the room satisfies accessibility requirements.
    pub accessible: bool,
    /// Intervals currently claimed, with the claiming group.
    pub occupied: Vec<OccupiedSlot>,
    /// Group committed to this room for its whole week, if any.
    pub fixed_occupant: Option<GroupId>,
}

impl Room {
    /// Creates an empty room. The id is derived from building, floor, and number.
    pub fn new(building: impl Into<String>, floor: u8, number: u8, capacity: u32) -> Self {
        let building = building.into();
        let id = format!("{building}-{floor}{number:02}");
        Self {
            id,
            building,
            floor,
            number,
            capacity,
            accessible: false,
            occupied: Vec::new(),
            fixed_occupant: None,
        }
    }

    /// Marks the room accessible.
    pub fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    /// Whether the interval is free of conflicts with other groups' slots.
    ///
    /// Slots held by `group_id` itself do not count as conflicts, so
    /// re-claiming a slot the same group already holds is allowed.
    pub fn is_free_for(&self, interval: &TimeInterval, group_id: &str) -> bool {
        !self
            .occupied
            .iter()
            .any(|slot| slot.group_id != group_id && slot.interval.conflicts_with(interval))
    }

    /// Whether the interval is free of conflicts with any occupied slot.
    pub fn is_free(&self, interval: &TimeInterval) -> bool {
        !self
            .occupied
            .iter()
            .any(|slot| slot.interval.conflicts_with(interval))
    }

    /// Claims an interval for a group.
    ///
    /// Returns `false` (and leaves the room unchanged) if the interval
    /// conflicts with a slot held by a different group.
    pub fn occupy(&mut self, interval: TimeInterval, group_id: impl Into<GroupId>) -> bool {
        let group_id = group_id.into();
        if !self.is_free_for(&interval, &group_id) {
            return false;
        }
        self.occupied.push(OccupiedSlot { interval, group_id });
        true
    }

    /// Releases every slot held by a group and clears `fixed_occupant` if it
    /// names that group. Returns the number of slots released.
    pub fn release_group(&mut self, group_id: &str) -> usize {
        let before = self.occupied.len();
        self.occupied.retain(|slot| slot.group_id != group_id);
        if self.fixed_occupant.as_deref() == Some(group_id) {
            self.fixed_occupant = None;
        }
        before - self.occupied.len()
    }

    /// Occupied slots sorted by day then start time, for calendar rendering.
    pub fn occupancy_view(&self) -> Vec<&OccupiedSlot> {
        let mut slots: Vec<&OccupiedSlot> = self.occupied.iter().collect();
        slots.sort_by_key(|s| (s.interval.day, s.interval.start, s.group_id.clone()));
        slots
    }

    /// Absolute difference between capacity and a group size, the
    /// capacity-fit rank used by room selection.
    #[inline]
    pub fn capacity_slack(&self, student_count: u32) -> u32 {
        self.capacity.abs_diff(student_count)
    }
}
