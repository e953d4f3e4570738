//! Floor-exchange adjustment pass.
//!
//! Final repair: an early-morning group stuck on an upper floor trades rooms
//! with a ground-floor group when the trade is mutually feasible. Feasibility
//! is bidirectional — each group's entire weekly requirement must fit the
//! other's room in both capacity and time, with both groups' own occupancy
//! out of the picture. First feasible ground-floor candidate wins; the pass
//! releases both rooms, re-commits each group into the other's room, and
//! propagates the new room ids onto the affected sessions and their
//! assignment records.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info, warn};

use crate::allocator::weekly_requirement;
use crate::availability::{check_room, Requirement};
use crate::config::EngineConfig;
use crate::models::{
    AssignmentRecord, ClassSession, Group, GroupId, Room, SessionId, TimeInterval,
};

/// The exchange pass: mutable views over the run's state.
pub(crate) struct FloorExchange<'a> {
    pub rooms: &'a mut [Room],
    pub sessions: &'a mut [ClassSession],
    pub groups: &'a BTreeMap<GroupId, Group>,
    pub in_person: &'a [SessionId],
    pub priority_groups: &'a HashSet<GroupId>,
    pub config: &'a EngineConfig,
    pub assignments: &'a mut Vec<AssignmentRecord>,
}

impl FloorExchange<'_> {
    /// Runs the pass. Returns the number of swaps performed.
    pub fn run(&mut self) -> usize {
        let mut swaps = 0;
        for upper_idx in 0..self.rooms.len() {
            if !self
                .config
                .is_exchange_floor(self.rooms[upper_idx].floor)
            {
                continue;
            }
            let Some(morning_id) = self.rooms[upper_idx].fixed_occupant.clone() else {
                continue;
            };
            if !self.is_early_morning_group(&morning_id) {
                continue;
            }
            if self.try_swap(upper_idx, &morning_id) {
                swaps += 1;
            }
        }
        if swaps > 0 {
            info!("floor exchange: {swaps} swaps performed");
        }
        swaps
    }

    /// Whether any in-person session of the group starts at an early time.
    fn is_early_morning_group(&self, group_id: &str) -> bool {
        self.in_person.iter().any(|&id| {
            let session = &self.sessions[id];
            session.group_id == group_id && self.config.is_early_start(session.start)
        })
    }

    /// First-fit search over ground-floor rooms with a fixed occupant.
    fn try_swap(&mut self, upper_idx: usize, morning_id: &str) -> bool {
        let Ok(morning_blocks) = weekly_requirement(self.sessions, self.in_person, morning_id)
        else {
            return false;
        };
        if morning_blocks.is_empty() {
            return false;
        }

        for ground_idx in 0..self.rooms.len() {
            if self.rooms[ground_idx].floor != self.config.accessible_floor {
                continue;
            }
            let Some(incumbent_id) = self.rooms[ground_idx].fixed_occupant.clone() else {
                continue;
            };
            // Moving a priority or accessibility-bound group off the ground
            // floor would break its placement invariant.
            if self.priority_groups.contains(&incumbent_id) {
                continue;
            }
            let Some(incumbent) = self.groups.get(&incumbent_id) else {
                continue;
            };
            if incumbent.requires_accessibility {
                continue;
            }
            let Ok(incumbent_blocks) =
                weekly_requirement(self.sessions, self.in_person, &incumbent_id)
            else {
                continue;
            };
            if incumbent_blocks.is_empty() {
                continue;
            }

            if !self.swap_feasible(
                upper_idx,
                ground_idx,
                morning_id,
                &morning_blocks,
                &incumbent_id,
                &incumbent_blocks,
            ) {
                continue;
            }

            debug!(
                "floor exchange: {} {} <-> {} {}",
                morning_id, self.rooms[upper_idx].id, incumbent_id, self.rooms[ground_idx].id
            );
            self.perform_swap(
                upper_idx,
                ground_idx,
                morning_id,
                &morning_blocks,
                &incumbent_id,
                &incumbent_blocks,
            );
            return true;
        }
        false
    }

    /// Bidirectional feasibility with both groups' own occupancy removed.
    #[allow(clippy::too_many_arguments)]
    fn swap_feasible(
        &self,
        upper_idx: usize,
        ground_idx: usize,
        morning_id: &str,
        morning_blocks: &[TimeInterval],
        incumbent_id: &str,
        incumbent_blocks: &[TimeInterval],
    ) -> bool {
        let morning = self.groups.get(morning_id);
        let morning_count = morning.map_or(0, |g| g.student_count);
        let morning_access = morning.is_some_and(|g| g.requires_accessibility);
        let incumbent = self.groups.get(incumbent_id);
        let incumbent_count = incumbent.map_or(0, |g| g.student_count);

        let mut ground = self.rooms[ground_idx].clone();
        ground.release_group(morning_id);
        ground.release_group(incumbent_id);
        let morning_req = Requirement {
            group_id: morning_id,
            blocks: morning_blocks,
            required_capacity: morning_count,
            requires_accessibility: morning_access,
        };
        if check_room(&ground, &morning_req, self.config.accessible_floor).is_err() {
            return false;
        }

        let mut upper = self.rooms[upper_idx].clone();
        upper.release_group(morning_id);
        upper.release_group(incumbent_id);
        let incumbent_req = Requirement {
            group_id: incumbent_id,
            blocks: incumbent_blocks,
            required_capacity: incumbent_count,
            // A requires_accessibility incumbent is skipped earlier
            requires_accessibility: false,
        };
        check_room(&upper, &incumbent_req, self.config.accessible_floor).is_ok()
    }

    /// Releases both rooms and re-commits each group into the other's room.
    #[allow(clippy::too_many_arguments)]
    fn perform_swap(
        &mut self,
        upper_idx: usize,
        ground_idx: usize,
        morning_id: &str,
        morning_blocks: &[TimeInterval],
        incumbent_id: &str,
        incumbent_blocks: &[TimeInterval],
    ) {
        self.rooms[upper_idx].release_group(morning_id);
        self.rooms[ground_idx].release_group(incumbent_id);

        self.recommit(ground_idx, morning_id, morning_blocks);
        self.recommit(upper_idx, incumbent_id, incumbent_blocks);
    }

    fn recommit(&mut self, room_idx: usize, group_id: &str, blocks: &[TimeInterval]) {
        for block in blocks {
            if !self.rooms[room_idx].occupy(*block, group_id.to_string()) {
                // Feasibility ran against the post-release state, so this
                // only fires on inconsistent occupancy data.
                warn!(
                    "floor exchange: lost slot {} in {} for group {group_id}",
                    block, self.rooms[room_idx].id
                );
            }
        }
        self.rooms[room_idx].fixed_occupant = Some(group_id.to_string());

        let room_id = self.rooms[room_idx].id.clone();
        let mut moved: Vec<SessionId> = Vec::new();
        for &id in self.in_person {
            let session = &mut self.sessions[id];
            if session.group_id == group_id && session.assigned_room.is_some() {
                session.assigned_room = Some(room_id.clone());
                moved.push(id);
            }
        }
        for record in self.assignments.iter_mut() {
            if moved.contains(&record.session) {
                record.room = Some(room_id.clone());
            }
        }
    }
}
