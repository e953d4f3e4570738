//! Allocation run context.
//!
//! [`AllocationRun`] owns the state a run mutates — the room set, the group
//! map, the sessions, and the outcome logs — and drives the pipeline:
//! classify sessions, order groups, run the allocator cascade, repair with
//! the optimizer, and finish with the floor-exchange pass. The allocation
//! phase is sequential by design: each group's strategy evaluation commits
//! or fails before the next group is considered, because later availability
//! depends on rooms already claimed.

use std::collections::{BTreeMap, HashSet};

use log::info;

use crate::allocator::Allocator;
use crate::classify::{classify, LabCatalog, LabReason, SessionKind};
use crate::config::EngineConfig;
use crate::exchange::FloorExchange;
use crate::ingest::Ingested;
use crate::models::{
    AssignmentRecord, ClassSession, Group, GroupId, GroupSplit, Room, RunReport, SessionId,
    UnresolvedError,
};
use crate::optimizer::Optimizer;
use crate::ordering::order_groups;

/// Owns one allocation run: inputs, mutable room state, and outcome logs.
#[derive(Debug, Clone)]
pub struct AllocationRun {
    rooms: Vec<Room>,
    groups: BTreeMap<GroupId, Group>,
    sessions: Vec<ClassSession>,
    priority_groups: HashSet<GroupId>,
    catalog: LabCatalog,
    config: EngineConfig,
    in_person: Vec<SessionId>,
    virtual_count: usize,
    lab_count: usize,
    assignments: Vec<AssignmentRecord>,
    errors: Vec<UnresolvedError>,
    splits: Vec<GroupSplit>,
}

impl AllocationRun {
    /// Creates a run over a room inventory and ingested sessions.
    pub fn new(rooms: Vec<Room>, ingested: Ingested) -> Self {
        Self {
            rooms,
            groups: ingested.groups,
            sessions: ingested.sessions,
            priority_groups: HashSet::new(),
            catalog: LabCatalog::new(),
            config: EngineConfig::default(),
            in_person: Vec::new(),
            virtual_count: 0,
            lab_count: 0,
            assignments: Vec::new(),
            errors: Vec::new(),
            splits: Vec::new(),
        }
    }

    /// Sets the operator-selected priority groups.
    pub fn with_priority_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.priority_groups = groups.into_iter().collect();
        self
    }

    /// Sets the lab subject catalog.
    pub fn with_catalog(mut self, catalog: LabCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the full pipeline: classify → order → allocate → optimize →
    /// exchange. Returns the group order the allocator used.
    pub fn run(&mut self) -> Vec<GroupId> {
        self.classify_sessions();

        let in_person_sessions: Vec<ClassSession> = self
            .in_person
            .iter()
            .map(|&id| self.sessions[id].clone())
            .collect();
        let order = order_groups(
            &in_person_sessions,
            &self.groups,
            &self.priority_groups,
            &self.config,
        );

        let mut allocator = Allocator {
            rooms: &mut self.rooms,
            sessions: &mut self.sessions,
            groups: &self.groups,
            in_person: &self.in_person,
            priority_groups: &self.priority_groups,
            config: &self.config,
            assignments: &mut self.assignments,
            errors: &mut self.errors,
            splits: &mut self.splits,
        };
        allocator.allocate(&order);

        let mut optimizer = Optimizer {
            rooms: &mut self.rooms,
            sessions: &mut self.sessions,
            groups: &self.groups,
            in_person: &self.in_person,
            priority_groups: &self.priority_groups,
            config: &self.config,
            assignments: &mut self.assignments,
            errors: &mut self.errors,
        };
        optimizer.run();

        let mut exchange = FloorExchange {
            rooms: &mut self.rooms,
            sessions: &mut self.sessions,
            groups: &self.groups,
            in_person: &self.in_person,
            priority_groups: &self.priority_groups,
            config: &self.config,
            assignments: &mut self.assignments,
        };
        exchange.run();

        info!(
            "run complete: {} assigned, {} unresolved, {} splits",
            self.assignments.len(),
            self.errors.len(),
            self.splits.len()
        );
        order
    }

    /// Routes every session: lab and virtual sessions are logged with a null
    /// room, the rest queue for allocation.
    fn classify_sessions(&mut self) {
        for id in 0..self.sessions.len() {
            let session = &self.sessions[id];
            let group = self.groups.get(&session.group_id);
            match classify(session, group, &self.catalog) {
                SessionKind::InPerson => self.in_person.push(id),
                SessionKind::Virtual => {
                    self.virtual_count += 1;
                    self.assignments.push(AssignmentRecord::roomless(
                        id,
                        "virtual session, no room required",
                    ));
                }
                SessionKind::Lab(reason) => {
                    self.lab_count += 1;
                    let note = match reason {
                        LabReason::CoreCurriculum => {
                            "core-curriculum lab session, no room required"
                        }
                        LabReason::ProgramSpecific => {
                            "program lab session, no room required"
                        }
                    };
                    self.assignments.push(AssignmentRecord::roomless(id, note));
                }
            }
        }
        info!(
            "classified {} sessions: {} in-person, {} virtual, {} lab",
            self.sessions.len(),
            self.in_person.len(),
            self.virtual_count,
            self.lab_count
        );
    }

    /// The room set with its occupancy state.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All sessions, with assigned rooms where allocation succeeded.
    pub fn sessions(&self) -> &[ClassSession] {
        &self.sessions
    }

    /// The group map.
    pub fn groups(&self) -> &BTreeMap<GroupId, Group> {
        &self.groups
    }

    /// The assignment log.
    pub fn assignments(&self) -> &[AssignmentRecord] {
        &self.assignments
    }

    /// The unresolved-error log.
    pub fn errors(&self) -> &[UnresolvedError] {
        &self.errors
    }

    /// The split log.
    pub fn splits(&self) -> &[GroupSplit] {
        &self.splits
    }

    /// Summary counts for reporting.
    pub fn report(&self) -> RunReport {
        RunReport {
            total_sessions: self.sessions.len(),
            in_person: self.in_person.len(),
            virtual_sessions: self.virtual_count,
            lab_sessions: self.lab_count,
            assigned: self
                .assignments
                .iter()
                .filter(|a| a.room.is_some())
                .count(),
            unresolved: self.errors.len(),
            splits: self.splits.len(),
        }
    }
}
