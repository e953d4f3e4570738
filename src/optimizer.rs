//! Post-allocation repair pass.
//!
//! Bounded-iteration retry of groups the cascade left unresolved. Each
//! iteration walks the no-room errors in log order and, for each affected
//! group, looks for a room with no `fixed_occupant` that is free for the
//! group's entire weekly requirement. A successful repair commits exactly as
//! the whole-week strategy does and deletes the group's no-room errors — the
//! only place a historical record is ever removed. The loop stops early when
//! an iteration repairs nothing. This pass never splits or exchanges.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info};

use crate::allocator::{commit_assignment, weekly_requirement, FixedPolicy};
use crate::availability::{check_room, Requirement};
use crate::config::EngineConfig;
use crate::models::{
    AssignmentRecord, ClassSession, Group, GroupId, Room, SessionId, UnresolvedError,
};

/// The repair pass: mutable views over the run's state.
pub(crate) struct Optimizer<'a> {
    pub rooms: &'a mut [Room],
    pub sessions: &'a mut [ClassSession],
    pub groups: &'a BTreeMap<GroupId, Group>,
    pub in_person: &'a [SessionId],
    pub priority_groups: &'a HashSet<GroupId>,
    pub config: &'a EngineConfig,
    pub assignments: &'a mut Vec<AssignmentRecord>,
    pub errors: &'a mut Vec<UnresolvedError>,
}

impl Optimizer<'_> {
    /// Runs up to `config.optimizer_iterations` repair iterations.
    /// Returns the total number of groups repaired.
    pub fn run(&mut self) -> usize {
        let mut total = 0;
        for iteration in 0..self.config.optimizer_iterations {
            let repaired = self.repair_iteration();
            debug!(
                "optimizer iteration {}/{}: {} repaired",
                iteration + 1,
                self.config.optimizer_iterations,
                repaired
            );
            total += repaired;
            if repaired == 0 {
                break;
            }
        }
        if total > 0 {
            info!("optimizer repaired {total} groups");
        }
        total
    }

    fn repair_iteration(&mut self) -> usize {
        // Distinct groups with retryable errors, in log order.
        let mut candidates: Vec<GroupId> = Vec::new();
        for error in self.errors.iter() {
            if error.reason.is_retryable() && !candidates.contains(&error.group_id) {
                candidates.push(error.group_id.clone());
            }
        }

        let mut repaired = 0;
        for group_id in candidates {
            if self.try_repair(&group_id) {
                repaired += 1;
            }
        }
        repaired
    }

    /// Reattempts the group's entire weekly requirement against unclaimed
    /// rooms. Plain retry only: no splitting, no exchanges.
    fn try_repair(&mut self, group_id: &str) -> bool {
        let group = match self.groups.get(group_id) {
            Some(g) => g.clone(),
            None => return false,
        };
        let blocks = match weekly_requirement(self.sessions, self.in_person, group_id) {
            Ok(blocks) if !blocks.is_empty() => blocks,
            _ => return false,
        };

        let requirement = Requirement {
            group_id,
            blocks: &blocks,
            required_capacity: group.student_count,
            requires_accessibility: group.requires_accessibility,
        };
        let is_priority = self.priority_groups.contains(group_id);

        let mut candidates: Vec<usize> = self
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.fixed_occupant.is_none())
            .filter(|(_, room)| !is_priority || room.floor == self.config.accessible_floor)
            .filter(|(_, room)| {
                check_room(room, &requirement, self.config.accessible_floor).is_ok()
            })
            .map(|(idx, _)| idx)
            .collect();
        candidates.sort_by_key(|&idx| {
            let room = &self.rooms[idx];
            (room.capacity_slack(group.student_count), room.floor)
        });

        let Some(&room_idx) = candidates.first() else {
            return false;
        };

        let committed = commit_assignment(
            self.rooms,
            room_idx,
            &blocks,
            group_id,
            self.sessions,
            self.in_person,
            self.assignments,
            FixedPolicy::Set,
            "repaired weekly room",
        );
        if committed.is_err() {
            return false;
        }

        info!(
            "optimizer: group {group_id} repaired into {}",
            self.rooms[room_idx].id
        );
        self.errors
            .retain(|e| !(e.group_id == group_id && e.reason.is_retryable()));
        true
    }
}
