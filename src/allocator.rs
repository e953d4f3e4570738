//! Room allocator.
//!
//! Walks groups in ordering-engine order and runs the strategy cascade for
//! each: whole-week single room (strict search) → exhaustive whole-week
//! single room (permissive search) → two-room weekly split along a
//! contiguous-day boundary → per-day independent assignment (config-gated)
//! → failure. Room occupancy for a group is committed or abandoned before
//! the next group is considered; later groups' availability depends on it.
//!
//! Evaluation errors (malformed session data) fail only the offending group
//! and are recorded with their distinguishing message; the run continues.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::{debug, info, warn};

use crate::availability::Requirement;
use crate::config::EngineConfig;
use crate::models::{
    AssignmentRecord, ClassSession, Group, GroupId, GroupSplit, Room, SessionId, TimeInterval,
    TimeOfDay, UnresolvedError, UnresolvedReason, Weekday,
};
use crate::selection::{search_room, SearchPolicy, Selection};

/// Error raised while evaluating one group. Fails that group only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEvalError {
    /// A session's time range is empty or inverted.
    InvalidInterval { subject_code: String, day: Weekday },
    /// A commit found the room occupied despite passing the availability
    /// check; indicates inconsistent occupancy data.
    OccupancyClash { room_id: String, day: Weekday },
}

impl fmt::Display for GroupEvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupEvalError::InvalidInterval { subject_code, day } => {
                write!(f, "invalid time range for {subject_code} on {day}")
            }
            GroupEvalError::OccupancyClash { room_id, day } => {
                write!(f, "occupancy clash in {room_id} on {day}")
            }
        }
    }
}

/// How a commit treats the room's `fixed_occupant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FixedPolicy {
    /// Claim the room for the group's week.
    Set,
    /// Claim only when no other group already holds the relationship.
    SetIfVacant,
    /// Leave as-is (split halves and per-day commits).
    Leave,
}

/// Derives a group's weekly requirement: one merged block per distinct day,
/// spanning the earliest start to the latest end of that day's in-person
/// sessions, sorted by day.
pub fn weekly_requirement(
    sessions: &[ClassSession],
    in_person: &[SessionId],
    group_id: &str,
) -> Result<Vec<TimeInterval>, GroupEvalError> {
    let mut bounds: BTreeMap<Weekday, (u16, u16)> = BTreeMap::new();
    for &id in in_person {
        let session = &sessions[id];
        if session.group_id != group_id {
            continue;
        }
        if session.start >= session.end {
            return Err(GroupEvalError::InvalidInterval {
                subject_code: session.subject_code.clone(),
                day: session.day,
            });
        }
        let entry = bounds
            .entry(session.day)
            .or_insert((session.start.minutes(), session.end.minutes()));
        entry.0 = entry.0.min(session.start.minutes());
        entry.1 = entry.1.max(session.end.minutes());
    }

    Ok(bounds
        .into_iter()
        .filter_map(|(day, (start, end))| {
            TimeInterval::new(day, TimeOfDay(start), TimeOfDay(end))
        })
        .collect())
}

/// Additive proximity score between two rooms for the split strategy.
/// Lower is closer.
pub(crate) fn proximity_score(a: &Room, b: &Room) -> u32 {
    let mut score = 0u32;
    if a.building != b.building {
        score += 1000;
    }
    if a.floor != b.floor {
        score += 100;
    }
    if a.building == b.building {
        score += 10 * u32::from(a.floor.abs_diff(b.floor));
        if a.floor == b.floor {
            score += u32::from(a.number.abs_diff(b.number));
        }
    }
    score
}

/// The allocator: mutable views over the run's state plus the inputs the
/// cascade needs.
pub(crate) struct Allocator<'a> {
    pub rooms: &'a mut [Room],
    pub sessions: &'a mut [ClassSession],
    pub groups: &'a BTreeMap<GroupId, Group>,
    pub in_person: &'a [SessionId],
    pub priority_groups: &'a HashSet<GroupId>,
    pub config: &'a EngineConfig,
    pub assignments: &'a mut Vec<AssignmentRecord>,
    pub errors: &'a mut Vec<UnresolvedError>,
    pub splits: &'a mut Vec<GroupSplit>,
}

impl Allocator<'_> {
    /// Runs the cascade for every group, in the given order.
    pub fn allocate(&mut self, group_order: &[GroupId]) {
        info!(
            "allocating rooms for {} groups across {} in-person sessions",
            group_order.len(),
            self.in_person.len()
        );
        for group_id in group_order {
            self.allocate_group(group_id);
        }
        info!(
            "allocation pass done: {} assignments, {} unresolved",
            self.assignments.len(),
            self.errors.len()
        );
    }

    fn allocate_group(&mut self, group_id: &str) {
        let group = match self.groups.get(group_id) {
            Some(g) => g.clone(),
            None => Group::new(group_id, 0),
        };

        match self.run_cascade(&group) {
            Ok(()) => {}
            Err(err) => {
                warn!("group {group_id}: evaluation failed: {err}");
                let reason = UnresolvedReason::Evaluation(err.to_string());
                self.log_group_failure(group_id, None, reason);
            }
        }
    }

    fn run_cascade(&mut self, group: &Group) -> Result<(), GroupEvalError> {
        let blocks = weekly_requirement(self.sessions, self.in_person, &group.id)?;
        if blocks.is_empty() {
            debug!("group {}: no in-person blocks, nothing to assign", group.id);
            return Ok(());
        }

        let is_priority = self.priority_groups.contains(&group.id);
        let mut saw_priority_floor_gap = false;

        // Whole-week single room, strict candidate filter.
        match self.search(group, &blocks, SearchPolicy::Strict, is_priority) {
            Selection::Room(idx) => {
                debug!("group {}: weekly room {}", group.id, self.rooms[idx].id);
                return self.commit(group, idx, &blocks, FixedPolicy::Set, "weekly room");
            }
            Selection::PriorityFloorUnavailable => saw_priority_floor_gap = true,
            Selection::NoCandidate => {}
        }

        // Exhaustive retry: every room, ranked purely by fit then floor.
        match self.search(group, &blocks, SearchPolicy::Permissive, is_priority) {
            Selection::Room(idx) => {
                debug!(
                    "group {}: weekly room {} on exhaustive retry",
                    group.id, self.rooms[idx].id
                );
                return self.commit(
                    group,
                    idx,
                    &blocks,
                    FixedPolicy::SetIfVacant,
                    "weekly room, exhaustive retry",
                );
            }
            Selection::PriorityFloorUnavailable => saw_priority_floor_gap = true,
            Selection::NoCandidate => {}
        }

        // Two-room weekly split along a contiguous-day boundary.
        if blocks.len() >= 2 && self.try_split(group, &blocks, is_priority)? {
            return Ok(());
        }

        // Per-day fallback: each day stands on its own.
        if self.config.per_day_fallback {
            self.allocate_per_day(group, &blocks, is_priority)?;
            return Ok(());
        }

        let reason = if saw_priority_floor_gap {
            UnresolvedReason::PriorityFloorUnavailable
        } else {
            UnresolvedReason::NoRoomAvailable
        };
        self.log_group_failure(&group.id, None, reason);
        Ok(())
    }

    fn search(
        &self,
        group: &Group,
        blocks: &[TimeInterval],
        policy: SearchPolicy,
        is_priority: bool,
    ) -> Selection {
        let requirement = Requirement {
            group_id: &group.id,
            blocks,
            required_capacity: group.student_count,
            requires_accessibility: group.requires_accessibility,
        };
        search_room(
            self.rooms,
            &requirement,
            group.student_count,
            is_priority,
            policy,
            self.config.accessible_floor,
        )
    }

    /// Every room feasible for the given blocks, in inventory order.
    fn feasible_rooms(
        &self,
        group: &Group,
        blocks: &[TimeInterval],
        is_priority: bool,
    ) -> Vec<usize> {
        let requirement = Requirement {
            group_id: &group.id,
            blocks,
            required_capacity: group.student_count,
            requires_accessibility: group.requires_accessibility,
        };
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| {
                crate::availability::check_room(room, &requirement, self.config.accessible_floor)
                    .is_ok()
            })
            .filter(|(_, room)| !is_priority || room.floor == self.config.accessible_floor)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Tries every contiguous partition of the group's days, first one with
    /// a feasible room-pair wins. Returns whether a split was committed.
    fn try_split(
        &mut self,
        group: &Group,
        blocks: &[TimeInterval],
        is_priority: bool,
    ) -> Result<bool, GroupEvalError> {
        for cut in 1..blocks.len() {
            let (first, second) = blocks.split_at(cut);
            let rooms_a = self.feasible_rooms(group, first, is_priority);
            if rooms_a.is_empty() {
                continue;
            }
            let rooms_b = self.feasible_rooms(group, second, is_priority);
            if rooms_b.is_empty() {
                continue;
            }

            let mut best: Option<(u32, usize, usize)> = None;
            for &a in &rooms_a {
                for &b in &rooms_b {
                    if a == b && halves_overlap(first, second) {
                        continue;
                    }
                    let score = proximity_score(&self.rooms[a], &self.rooms[b]);
                    if best.map_or(true, |(s, _, _)| score < s) {
                        best = Some((score, a, b));
                    }
                }
            }

            if let Some((score, a, b)) = best {
                info!(
                    "group {}: split week across {} and {} (proximity {})",
                    group.id, self.rooms[a].id, self.rooms[b].id, score
                );
                self.commit(group, a, first, FixedPolicy::Leave, "split week, first half")?;
                self.commit(group, b, second, FixedPolicy::Leave, "split week, second half")?;
                self.splits.push(GroupSplit {
                    group_id: group.id.clone(),
                    room_a: self.rooms[a].id.clone(),
                    days_a: first.iter().map(|iv| iv.day).collect(),
                    room_b: self.rooms[b].id.clone(),
                    days_b: second.iter().map(|iv| iv.day).collect(),
                });
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Assigns each day block independently; failed days log per-session
    /// errors, successful days commit normally.
    fn allocate_per_day(
        &mut self,
        group: &Group,
        blocks: &[TimeInterval],
        is_priority: bool,
    ) -> Result<(), GroupEvalError> {
        for block in blocks {
            let single = [*block];
            let selection = match self.search(group, &single, SearchPolicy::Strict, is_priority) {
                Selection::NoCandidate => {
                    self.search(group, &single, SearchPolicy::Permissive, is_priority)
                }
                other => other,
            };
            match selection {
                Selection::Room(idx) => {
                    debug!(
                        "group {}: day room {} for {}",
                        group.id, self.rooms[idx].id, block.day
                    );
                    self.commit(group, idx, &single, FixedPolicy::Leave, "per-day room")?;
                }
                Selection::PriorityFloorUnavailable => {
                    self.log_group_failure(
                        &group.id,
                        Some(block.day),
                        UnresolvedReason::PriorityFloorUnavailable,
                    );
                }
                Selection::NoCandidate => {
                    self.log_group_failure(
                        &group.id,
                        Some(block.day),
                        UnresolvedReason::NoRoomForDay(block.day),
                    );
                }
            }
        }
        Ok(())
    }

    fn commit(
        &mut self,
        group: &Group,
        room_idx: usize,
        blocks: &[TimeInterval],
        fixed: FixedPolicy,
        note: &str,
    ) -> Result<(), GroupEvalError> {
        commit_assignment(
            self.rooms,
            room_idx,
            blocks,
            &group.id,
            self.sessions,
            self.in_person,
            self.assignments,
            fixed,
            note,
        )
    }

    /// Logs one error per affected in-person session of the group. When
    /// `day` is set only that day's sessions are affected.
    fn log_group_failure(&mut self, group_id: &str, day: Option<Weekday>, reason: UnresolvedReason) {
        let mut logged = false;
        for &id in self.in_person {
            let session = &self.sessions[id];
            if session.group_id != group_id {
                continue;
            }
            if let Some(day) = day {
                if session.day != day {
                    continue;
                }
            }
            self.errors
                .push(UnresolvedError::for_session(id, group_id, reason.clone()));
            logged = true;
        }
        if !logged {
            self.errors
                .push(UnresolvedError::for_group(group_id, reason));
        }
    }
}

/// Whether any interval in one half literally overlaps one in the other.
/// Defensive check for same-room split pairs; the halves' days are disjoint
/// by construction, so this only fires on inconsistent data.
fn halves_overlap(first: &[TimeInterval], second: &[TimeInterval]) -> bool {
    first
        .iter()
        .any(|a| second.iter().any(|b| a.conflicts_with(b)))
}

/// Occupies the room for every block, assigns the room to every matching
/// session of the group on those days, and logs one assignment record per
/// session. Shared by the cascade, the optimizer, and the exchange pass.
#[allow(clippy::too_many_arguments)]
pub(crate) fn commit_assignment(
    rooms: &mut [Room],
    room_idx: usize,
    blocks: &[TimeInterval],
    group_id: &str,
    sessions: &mut [ClassSession],
    in_person: &[SessionId],
    assignments: &mut Vec<AssignmentRecord>,
    fixed: FixedPolicy,
    note: &str,
) -> Result<(), GroupEvalError> {
    let room_id = rooms[room_idx].id.clone();
    for block in blocks {
        if !rooms[room_idx].occupy(*block, group_id.to_string()) {
            return Err(GroupEvalError::OccupancyClash {
                room_id,
                day: block.day,
            });
        }
    }
    match fixed {
        FixedPolicy::Set => rooms[room_idx].fixed_occupant = Some(group_id.to_string()),
        FixedPolicy::SetIfVacant => {
            let occupant = &mut rooms[room_idx].fixed_occupant;
            if occupant.is_none() {
                *occupant = Some(group_id.to_string());
            }
        }
        FixedPolicy::Leave => {}
    }

    let days: Vec<Weekday> = blocks.iter().map(|iv| iv.day).collect();
    for &id in in_person {
        let session = &mut sessions[id];
        if session.group_id == group_id && days.contains(&session.day) {
            session.assigned_room = Some(room_id.clone());
            assignments.push(AssignmentRecord::placed(
                id,
                room_id.clone(),
                format!("{note}: {room_id}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Modality, TimeOfDay};

    fn session(group: &str, day: Weekday, sh: u16, eh: u16, capacity: u32) -> ClassSession {
        ClassSession::new(
            group,
            "SUB-1",
            day,
            TimeOfDay::hm(sh, 0),
            TimeOfDay::hm(eh, 0),
            capacity,
        )
        .with_modality(Modality::InPerson)
    }

    struct Fixture {
        rooms: Vec<Room>,
        sessions: Vec<ClassSession>,
        groups: BTreeMap<GroupId, Group>,
        in_person: Vec<SessionId>,
        priority: HashSet<GroupId>,
        config: EngineConfig,
        assignments: Vec<AssignmentRecord>,
        errors: Vec<UnresolvedError>,
        splits: Vec<GroupSplit>,
    }

    impl Fixture {
        fn new(rooms: Vec<Room>, sessions: Vec<ClassSession>, groups: Vec<Group>) -> Self {
            let in_person = (0..sessions.len()).collect();
            Self {
                rooms,
                sessions,
                groups: groups.into_iter().map(|g| (g.id.clone(), g)).collect(),
                in_person,
                priority: HashSet::new(),
                config: EngineConfig::default(),
                assignments: Vec::new(),
                errors: Vec::new(),
                splits: Vec::new(),
            }
        }

        fn allocate(&mut self, order: &[&str]) {
            let order: Vec<GroupId> = order.iter().map(|s| s.to_string()).collect();
            let mut alloc = Allocator {
                rooms: &mut self.rooms,
                sessions: &mut self.sessions,
                groups: &self.groups,
                in_person: &self.in_person,
                priority_groups: &self.priority,
                config: &self.config,
                assignments: &mut self.assignments,
                errors: &mut self.errors,
                splits: &mut self.splits,
            };
            alloc.allocate(&order);
        }

        fn room(&self, id: &str) -> &Room {
            self.rooms.iter().find(|r| r.id == id).unwrap()
        }
    }

    #[test]
    fn test_weekly_requirement_merges_day_blocks() {
        let sessions = vec![
            session("601", Weekday::Mon, 8, 10, 20),
            session("601", Weekday::Mon, 10, 12, 20),
            session("601", Weekday::Wed, 9, 11, 20),
            session("602", Weekday::Mon, 8, 10, 20),
        ];
        let in_person: Vec<SessionId> = (0..sessions.len()).collect();
        let blocks = weekly_requirement(&sessions, &in_person, "601").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].day, Weekday::Mon);
        assert_eq!(blocks[0].start, TimeOfDay::hm(8, 0));
        assert_eq!(blocks[0].end, TimeOfDay::hm(12, 0));
        assert_eq!(blocks[1].day, Weekday::Wed);
    }

    #[test]
    fn test_weekly_requirement_rejects_inverted_session() {
        let mut bad = session("601", Weekday::Mon, 10, 8, 20);
        bad.subject_code = "BAD-1".into();
        let sessions = vec![bad];
        let err = weekly_requirement(&sessions, &[0], "601").unwrap_err();
        assert!(matches!(err, GroupEvalError::InvalidInterval { .. }));
    }

    #[test]
    fn test_capacity_fit_wins_over_floor() {
        // G1 Mon/Wed/Fri 08:00-09:00, 15 students; floor-1 cap 20 and
        // floor-3 cap 16 both free → floor-3 wins on tighter fit.
        let rooms = vec![Room::new("F", 1, 1, 20), Room::new("F", 3, 1, 16)];
        let sessions = vec![
            session("G1", Weekday::Mon, 8, 9, 15),
            session("G1", Weekday::Wed, 8, 9, 15),
            session("G1", Weekday::Fri, 8, 9, 15),
        ];
        let groups = vec![Group::new("G1", 15)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.allocate(&["G1"]);

        assert!(fx.errors.is_empty());
        assert_eq!(fx.assignments.len(), 3);
        for s in &fx.sessions {
            assert_eq!(s.assigned_room.as_deref(), Some("F-301"));
        }
        assert_eq!(fx.room("F-301").fixed_occupant.as_deref(), Some("G1"));
        assert_eq!(fx.room("F-301").occupied.len(), 3);
    }

    #[test]
    fn test_priority_group_unresolved_when_floor_one_busy() {
        // Only the floor-3 room is free: a priority group stays unresolved.
        let rooms = vec![Room::new("F", 3, 1, 16)];
        let sessions = vec![
            session("G1", Weekday::Mon, 8, 9, 15),
            session("G1", Weekday::Wed, 8, 9, 15),
        ];
        let groups = vec![Group::new("G1", 15)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.priority.insert("G1".into());
        fx.allocate(&["G1"]);

        assert!(fx.assignments.is_empty());
        assert_eq!(fx.errors.len(), 2);
        for e in &fx.errors {
            assert_eq!(e.reason, UnresolvedReason::PriorityFloorUnavailable);
        }
        assert!(fx.sessions.iter().all(|s| s.assigned_room.is_none()));
    }

    #[test]
    fn test_exhaustive_retry_uses_fixed_room() {
        // The only feasible room is fixed to another group: the strict pass
        // skips it, the exhaustive retry takes it without stealing the
        // fixed-occupant relationship.
        let mut room = Room::new("F", 1, 1, 40);
        room.fixed_occupant = Some("OTHER".into());
        let rooms = vec![room];
        let sessions = vec![session("G1", Weekday::Mon, 8, 9, 30)];
        let groups = vec![Group::new("G1", 30)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.config = fx.config.clone().with_per_day_fallback(false);
        fx.allocate(&["G1"]);

        assert!(fx.errors.is_empty());
        assert_eq!(fx.sessions[0].assigned_room.as_deref(), Some("F-101"));
        assert_eq!(fx.room("F-101").fixed_occupant.as_deref(), Some("OTHER"));
    }

    #[test]
    fn test_split_across_adjacent_floors() {
        // G2 needs Mon-Thu; room A is free Mon/Tue only, room B (same
        // building, adjacent floor) is free Wed/Thu only.
        let mut room_a = Room::new("F", 1, 1, 40);
        let mut room_b = Room::new("F", 2, 1, 40);
        // Block A on Wed/Thu and B on Mon/Tue with a filler group.
        for day in [Weekday::Wed, Weekday::Thu] {
            room_a.occupy(
                TimeInterval::new(day, TimeOfDay::hm(7, 0), TimeOfDay::hm(22, 0)).unwrap(),
                "BLOCK",
            );
        }
        for day in [Weekday::Mon, Weekday::Tue] {
            room_b.occupy(
                TimeInterval::new(day, TimeOfDay::hm(7, 0), TimeOfDay::hm(22, 0)).unwrap(),
                "BLOCK",
            );
        }
        let rooms = vec![room_a, room_b];
        let sessions = vec![
            session("G2", Weekday::Mon, 8, 10, 30),
            session("G2", Weekday::Tue, 8, 10, 30),
            session("G2", Weekday::Wed, 8, 10, 30),
            session("G2", Weekday::Thu, 8, 10, 30),
        ];
        let groups = vec![Group::new("G2", 30)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.allocate(&["G2"]);

        assert!(fx.errors.is_empty());
        assert_eq!(fx.splits.len(), 1);
        let split = &fx.splits[0];
        assert_eq!(split.room_a, "F-101");
        assert_eq!(split.days_a, vec![Weekday::Mon, Weekday::Tue]);
        assert_eq!(split.room_b, "F-201");
        assert_eq!(split.days_b, vec![Weekday::Wed, Weekday::Thu]);
        // Split halves never claim the fixed-occupant relationship
        assert!(fx.room("F-101").fixed_occupant.is_none());
        assert!(fx.room("F-201").fixed_occupant.is_none());
        assert_eq!(fx.sessions[0].assigned_room.as_deref(), Some("F-101"));
        assert_eq!(fx.sessions[3].assigned_room.as_deref(), Some("F-201"));
    }

    #[test]
    fn test_split_prefers_closer_pair() {
        // Two feasible pairs: same-building adjacent floor (score 110) vs
        // different building (score >= 1000). The closer pair wins.
        let mut far = Room::new("D", 1, 1, 40);
        let mut near = Room::new("F", 2, 1, 40);
        let mut anchor = Room::new("F", 1, 1, 40);
        for day in [Weekday::Wed, Weekday::Thu] {
            anchor.occupy(
                TimeInterval::new(day, TimeOfDay::hm(7, 0), TimeOfDay::hm(22, 0)).unwrap(),
                "BLOCK",
            );
        }
        for day in [Weekday::Mon, Weekday::Tue] {
            near.occupy(
                TimeInterval::new(day, TimeOfDay::hm(7, 0), TimeOfDay::hm(22, 0)).unwrap(),
                "BLOCK",
            );
            far.occupy(
                TimeInterval::new(day, TimeOfDay::hm(7, 0), TimeOfDay::hm(22, 0)).unwrap(),
                "BLOCK",
            );
        }
        let rooms = vec![anchor, near, far];
        let sessions = vec![
            session("G2", Weekday::Mon, 8, 10, 30),
            session("G2", Weekday::Tue, 8, 10, 30),
            session("G2", Weekday::Wed, 8, 10, 30),
            session("G2", Weekday::Thu, 8, 10, 30),
        ];
        let groups = vec![Group::new("G2", 30)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.allocate(&["G2"]);

        assert_eq!(fx.splits.len(), 1);
        assert_eq!(fx.splits[0].room_a, "F-101");
        assert_eq!(fx.splits[0].room_b, "F-201");
    }

    #[test]
    fn test_per_day_fallback_partial_success() {
        // One room, free Mon but blocked Wed: per-day fallback places Mon
        // and logs Wed.
        let mut room = Room::new("F", 1, 1, 40);
        room.occupy(
            TimeInterval::new(Weekday::Wed, TimeOfDay::hm(7, 0), TimeOfDay::hm(22, 0)).unwrap(),
            "BLOCK",
        );
        let rooms = vec![room];
        let sessions = vec![
            session("G1", Weekday::Mon, 8, 10, 30),
            session("G1", Weekday::Wed, 8, 10, 30),
        ];
        let groups = vec![Group::new("G1", 30)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.allocate(&["G1"]);

        assert_eq!(fx.assignments.len(), 1);
        assert_eq!(fx.sessions[0].assigned_room.as_deref(), Some("F-101"));
        assert!(fx.sessions[1].assigned_room.is_none());
        assert_eq!(fx.errors.len(), 1);
        assert_eq!(
            fx.errors[0].reason,
            UnresolvedReason::NoRoomForDay(Weekday::Wed)
        );
    }

    #[test]
    fn test_failure_without_fallback() {
        let mut room = Room::new("F", 1, 1, 40);
        for day in [Weekday::Mon, Weekday::Wed] {
            room.occupy(
                TimeInterval::new(day, TimeOfDay::hm(7, 0), TimeOfDay::hm(22, 0)).unwrap(),
                "BLOCK",
            );
        }
        let rooms = vec![room];
        let sessions = vec![
            session("G1", Weekday::Mon, 8, 10, 30),
            session("G1", Weekday::Wed, 8, 10, 30),
        ];
        let groups = vec![Group::new("G1", 30)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.config = fx.config.clone().with_per_day_fallback(false);
        fx.allocate(&["G1"]);

        assert!(fx.assignments.is_empty());
        assert_eq!(fx.errors.len(), 2);
        assert!(fx
            .errors
            .iter()
            .all(|e| e.reason == UnresolvedReason::NoRoomAvailable));
    }

    #[test]
    fn test_evaluation_error_fails_only_that_group() {
        let rooms = vec![Room::new("F", 1, 1, 40), Room::new("F", 1, 2, 40)];
        let mut bad = session("BAD", Weekday::Mon, 10, 8, 20);
        bad.subject_code = "BAD-1".into();
        let sessions = vec![bad, session("G1", Weekday::Mon, 8, 10, 30)];
        let groups = vec![Group::new("BAD", 20), Group::new("G1", 30)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.allocate(&["BAD", "G1"]);

        // BAD fails with a distinguishing evaluation reason, G1 proceeds
        assert_eq!(fx.sessions[1].assigned_room.as_deref(), Some("F-101"));
        assert!(fx
            .errors
            .iter()
            .any(|e| matches!(e.reason, UnresolvedReason::Evaluation(_))));
        assert!(!fx
            .errors
            .iter()
            .any(|e| e.group_id == "G1"));
    }

    #[test]
    fn test_committed_rooms_never_double_booked() {
        // Two groups with identical needs, one room: second group fails or
        // falls to per-day with no overlap committed.
        let rooms = vec![Room::new("F", 1, 1, 40)];
        let sessions = vec![
            session("G1", Weekday::Mon, 8, 10, 30),
            session("G2", Weekday::Mon, 9, 11, 30),
        ];
        let groups = vec![Group::new("G1", 30), Group::new("G2", 30)];
        let mut fx = Fixture::new(rooms, sessions, groups);
        fx.allocate(&["G1", "G2"]);

        let room = fx.room("F-101");
        for (i, a) in room.occupied.iter().enumerate() {
            for b in &room.occupied[i + 1..] {
                assert!(
                    a.group_id == b.group_id || !a.interval.conflicts_with(&b.interval),
                    "overlapping commitments from different groups"
                );
            }
        }
        assert!(fx.errors.iter().any(|e| e.group_id == "G2"));
    }

    #[test]
    fn test_proximity_score_components() {
        let f1 = Room::new("F", 1, 1, 40);
        let f1b = Room::new("F", 1, 4, 40);
        let f3 = Room::new("F", 3, 1, 40);
        let d1 = Room::new("D", 1, 1, 40);

        assert_eq!(proximity_score(&f1, &f1), 0);
        assert_eq!(proximity_score(&f1, &f1b), 3);
        assert_eq!(proximity_score(&f1, &f3), 100 + 20);
        assert_eq!(proximity_score(&f1, &d1), 1000);
        assert_eq!(proximity_score(&f3, &d1), 1000 + 100);
    }
}
