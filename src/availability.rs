//! Room availability checking.
//!
//! The single source of truth for "is this room free". Hard filters run in a
//! fixed order — capacity, accessibility, time conflict — and each failure
//! carries a distinct reason. Pure predicate: no room state is touched.

use std::fmt;

use crate::models::{Room, TimeInterval};

/// Why a room was rejected for a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Room too small for the requirement.
    Capacity { required: u32, capacity: u32 },
    /// Group requires accessibility and the room is not on the accessible floor.
    Accessibility { floor: u8 },
    /// An occupied slot overlaps one of the requested intervals.
    TimeConflict(TimeInterval),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Capacity { required, capacity } => {
                write!(f, "capacity {capacity} below required {required}")
            }
            RejectReason::Accessibility { floor } => {
                write!(f, "floor {floor} not accessible")
            }
            RejectReason::TimeConflict(interval) => {
                write!(f, "occupied during {interval}")
            }
        }
    }
}

/// What a group asks of a room: a set of weekly intervals plus capacity and
/// accessibility needs.
#[derive(Debug, Clone)]
pub struct Requirement<'a> {
    /// Requesting group; its own occupied slots never conflict.
    pub group_id: &'a str,
    /// Intervals the room must be free for, one merged block per day.
    pub blocks: &'a [TimeInterval],
    /// Seats needed.
    pub required_capacity: u32,
    /// Whether the room must be on the accessible floor.
    pub requires_accessibility: bool,
}

/// Checks a room against a requirement.
///
/// Filters apply in order; the first failure is returned:
/// 1. `room.capacity >= required_capacity`
/// 2. accessibility-requiring groups need `room.floor == accessible_floor`
/// 3. every block must be free of other groups' occupied slots
pub fn check_room(
    room: &Room,
    requirement: &Requirement<'_>,
    accessible_floor: u8,
) -> Result<(), RejectReason> {
    if room.capacity < requirement.required_capacity {
        return Err(RejectReason::Capacity {
            required: requirement.required_capacity,
            capacity: room.capacity,
        });
    }
    if requirement.requires_accessibility && room.floor != accessible_floor {
        return Err(RejectReason::Accessibility { floor: room.floor });
    }
    for block in requirement.blocks {
        if !room.is_free_for(block, requirement.group_id) {
            return Err(RejectReason::TimeConflict(*block));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeOfDay, Weekday};

    fn iv(day: Weekday, sh: u16, eh: u16) -> TimeInterval {
        TimeInterval::new(day, TimeOfDay::hm(sh, 0), TimeOfDay::hm(eh, 0)).unwrap()
    }

    fn requirement<'a>(blocks: &'a [TimeInterval], capacity: u32) -> Requirement<'a> {
        Requirement {
            group_id: "601",
            blocks,
            required_capacity: capacity,
            requires_accessibility: false,
        }
    }

    #[test]
    fn test_capacity_rejection() {
        let room = Room::new("F", 1, 1, 20);
        let blocks = [iv(Weekday::Mon, 8, 10)];
        let req = requirement(&blocks, 30);
        assert_eq!(
            check_room(&room, &req, 1),
            Err(RejectReason::Capacity {
                required: 30,
                capacity: 20
            })
        );
    }

    #[test]
    fn test_accessibility_rejection() {
        let room = Room::new("F", 3, 1, 40);
        let blocks = [iv(Weekday::Mon, 8, 10)];
        let mut req = requirement(&blocks, 30);
        req.requires_accessibility = true;
        assert_eq!(
            check_room(&room, &req, 1),
            Err(RejectReason::Accessibility { floor: 3 })
        );
    }

    #[test]
    fn test_time_conflict_rejection() {
        let mut room = Room::new("F", 1, 1, 40);
        room.occupy(iv(Weekday::Wed, 9, 11), "702");
        let blocks = [iv(Weekday::Mon, 8, 10), iv(Weekday::Wed, 8, 10)];
        let req = requirement(&blocks, 30);
        assert_eq!(
            check_room(&room, &req, 1),
            Err(RejectReason::TimeConflict(iv(Weekday::Wed, 8, 10)))
        );
    }

    #[test]
    fn test_own_slots_do_not_conflict() {
        let mut room = Room::new("F", 1, 1, 40);
        room.occupy(iv(Weekday::Mon, 8, 10), "601");
        let blocks = [iv(Weekday::Mon, 8, 10)];
        let req = requirement(&blocks, 30);
        assert_eq!(check_room(&room, &req, 1), Ok(()));
    }

    #[test]
    fn test_filter_order_capacity_first() {
        // Fails capacity and accessibility; capacity is reported
        let room = Room::new("F", 3, 1, 20);
        let blocks = [iv(Weekday::Mon, 8, 10)];
        let mut req = requirement(&blocks, 30);
        req.requires_accessibility = true;
        assert!(matches!(
            check_room(&room, &req, 1),
            Err(RejectReason::Capacity { .. })
        ));
    }

    #[test]
    fn test_all_filters_pass() {
        let room = Room::new("F", 1, 1, 40).with_accessible(true);
        let blocks = [iv(Weekday::Mon, 8, 10), iv(Weekday::Fri, 8, 10)];
        let mut req = requirement(&blocks, 40);
        req.requires_accessibility = true;
        assert_eq!(check_room(&room, &req, 1), Ok(()));
    }
}
