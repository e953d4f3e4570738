//! Session-row ingestion.
//!
//! Converts the plain rows produced by the parsing collaborator into
//! `ClassSession`s and a derived `Group` map. Group scheduling attributes
//! are parsed from the group id: the first digit maps to a program code,
//! the second is the academic level, the third the sequence number; ids that
//! don't follow the scheme keep zeroed attributes. A group's student count
//! is raised to the largest capacity requirement seen across its sessions.
//!
//! Structurally invalid rows abort ingestion with an [`IngestError`];
//! everything downstream of ingestion is best-effort and non-aborting.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ClassSession, Group, GroupId, Modality, TimeOfDay, Weekday};

/// One ingested row: the narrow data contract with the parsing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRow {
    /// Owning group id.
    pub group_id: String,
    /// Subject code.
    pub subject_code: String,
    /// Subject name.
    pub subject_name: String,
    /// Weekday of the session.
    pub day: Weekday,
    /// Start time.
    pub start: TimeOfDay,
    /// End time (exclusive).
    pub end: TimeOfDay,
    /// Declared modality.
    pub modality: Modality,
    /// Seats the session needs.
    pub required_capacity: u32,
    /// Whether the group needs an accessible room.
    pub requires_accessibility: bool,
}

/// Run-aborting ingestion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// A row carries an empty group id.
    #[error("row {row}: empty group id")]
    EmptyGroupId { row: usize },
    /// A row's time range is empty or inverted.
    #[error("row {row}: start {start} is not before end {end}")]
    InvalidTimeRange {
        row: usize,
        start: TimeOfDay,
        end: TimeOfDay,
    },
}

/// Sessions plus the derived group map.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Sessions in row order.
    pub sessions: Vec<ClassSession>,
    /// Groups keyed by id.
    pub groups: BTreeMap<GroupId, Group>,
}

/// Maps a group id's first digit to a program code.
///
/// Ids outside the digit scheme yield zero.
pub fn program_from_digit(digit: char) -> u32 {
    digit.to_digit(10).map_or(0, |d| d * 100)
}

/// Derives (program, level, sequence) from a group id, zeroes when the id
/// doesn't follow the three-digit scheme.
fn derive_attributes(group_id: &str) -> (u32, u8, u8) {
    let mut chars = group_id.chars();
    let (Some(first), Some(second), Some(third)) = (chars.next(), chars.next(), chars.next())
    else {
        return (0, 0, 0);
    };
    let program = program_from_digit(first);
    let level = second.to_digit(10).map_or(0, |d| d as u8);
    let sequence = third.to_digit(10).map_or(0, |d| d as u8);
    if program == 0 {
        return (0, 0, 0);
    }
    (program, level, sequence)
}

/// Ingests rows into sessions and groups.
///
/// Rows may come from several independently-parsed sources in any order;
/// the result depends only on row content (the allocator re-orders groups
/// itself), except that sessions keep row order for stable session ids.
pub fn ingest(rows: &[SessionRow]) -> Result<Ingested, IngestError> {
    let mut out = Ingested::default();

    for (idx, row) in rows.iter().enumerate() {
        if row.group_id.is_empty() {
            return Err(IngestError::EmptyGroupId { row: idx });
        }
        if row.start >= row.end {
            return Err(IngestError::InvalidTimeRange {
                row: idx,
                start: row.start,
                end: row.end,
            });
        }

        let session = ClassSession::new(
            row.group_id.clone(),
            row.subject_code.clone(),
            row.day,
            row.start,
            row.end,
            row.required_capacity,
        )
        .with_subject_name(row.subject_name.clone())
        .with_modality(row.modality);
        out.sessions.push(session);

        let group = out.groups.entry(row.group_id.clone()).or_insert_with(|| {
            let (program, level, sequence) = derive_attributes(&row.group_id);
            Group::new(row.group_id.clone(), 0).with_attributes(program, level, sequence)
        });
        group.raise_student_count(row.required_capacity);
        if row.requires_accessibility {
            group.requires_accessibility = true;
        }
    }

    debug!(
        "ingested {} sessions across {} groups",
        out.sessions.len(),
        out.groups.len()
    );
    Ok(out)
}
