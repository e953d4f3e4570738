//! Lab/virtual session classifier.
//!
//! Routes each session into in-person, virtual, or lab before allocation.
//! Virtual and lab sessions never consume a room. A session is lab-type when
//! its subject code appears in the catalog for its group's level — either in
//! the core-curriculum table (any program) or in the program-specific table —
//! regardless of its declared modality. The core table is checked first.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{ClassSession, Group, Modality};

/// Which lookup table matched a lab subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabReason {
    /// Core-curriculum subject, lab for every program.
    CoreCurriculum,
    /// Subject on the lab list of the group's own program.
    ProgramSpecific,
}

/// Classification of a single session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Needs a physical room.
    InPerson,
    /// Taught online; bypasses allocation.
    Virtual,
    /// Taught in a dedicated lab; bypasses allocation.
    Lab(LabReason),
}

/// Lookup tables of lab subject codes.
///
/// The core table applies to every program; the program table is keyed by
/// `(program, level)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabCatalog {
    core: HashMap<u8, HashSet<String>>,
    program: HashMap<(u32, u8), HashSet<String>>,
}

impl LabCatalog {
    /// Creates an empty catalog (nothing classifies as lab).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a core-curriculum lab subject for a level.
    pub fn with_core_subject(mut self, level: u8, code: impl Into<String>) -> Self {
        self.core.entry(level).or_default().insert(code.into());
        self
    }

    /// Registers a program-specific lab subject.
    pub fn with_program_subject(
        mut self,
        program: u32,
        level: u8,
        code: impl Into<String>,
    ) -> Self {
        self.program
            .entry((program, level))
            .or_default()
            .insert(code.into());
        self
    }

    /// Looks up a subject code for a group's level and program.
    pub fn lab_reason(&self, program: u32, level: u8, code: &str) -> Option<LabReason> {
        if self
            .core
            .get(&level)
            .is_some_and(|codes| codes.contains(code))
        {
            return Some(LabReason::CoreCurriculum);
        }
        if self
            .program
            .get(&(program, level))
            .is_some_and(|codes| codes.contains(code))
        {
            return Some(LabReason::ProgramSpecific);
        }
        None
    }
}

/// Classifies a session.
///
/// Lab lookup wins over the declared modality; a cataloged subject is lab
/// even when its row says otherwise.
pub fn classify(session: &ClassSession, group: Option<&Group>, catalog: &LabCatalog) -> SessionKind {
    if let Some(group) = group {
        if let Some(reason) = catalog.lab_reason(group.program, group.level, &session.subject_code)
        {
            return SessionKind::Lab(reason);
        }
    }
    match session.modality {
        Modality::Virtual => SessionKind::Virtual,
        Modality::Lab => SessionKind::Lab(LabReason::ProgramSpecific),
        Modality::InPerson => SessionKind::InPerson,
    }
}
