//! Room inventory construction.
//!
//! The room set is static for a run, built once from a building → floor →
//! room-count table with a uniform seat capacity. Rooms on the accessible
//! floor are flagged accessible.

use serde::{Deserialize, Serialize};

use crate::models::Room;

/// One building's floor layout: `rooms_per_floor[i]` rooms on floor `i + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Building name, e.g. `"F"`.
    pub name: String,
    /// Room count per floor, ground floor first.
    pub rooms_per_floor: Vec<u8>,
}

impl BuildingSpec {
    /// Creates a building spec.
    pub fn new(name: impl Into<String>, rooms_per_floor: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            rooms_per_floor,
        }
    }
}

/// Builds the room inventory from a building table.
///
/// Rooms are produced in table order — building by building, floor by floor,
/// room number ascending — which fixes the deterministic tie-break order the
/// selection heuristic relies on.
pub fn build_inventory(
    buildings: &[BuildingSpec],
    capacity: u32,
    accessible_floor: u8,
) -> Vec<Room> {
    let mut rooms = Vec::new();
    for building in buildings {
        for (floor_idx, &count) in building.rooms_per_floor.iter().enumerate() {
            let floor = floor_idx as u8 + 1;
            for number in 1..=count {
                let room = Room::new(building.name.clone(), floor, number, capacity)
                    .with_accessible(floor == accessible_floor);
                rooms.push(room);
            }
        }
    }
    rooms
}

/// The default campus: three buildings, four floors each, 40 seats per room,
/// floor 1 accessible. 63 rooms total.
pub fn default_campus() -> Vec<Room> {
    let buildings = [
        BuildingSpec::new("F", vec![4, 4, 4, 4]),
        BuildingSpec::new("E", vec![6, 6, 6, 5]),
        BuildingSpec::new("D", vec![6, 6, 6, 6]),
    ];
    build_inventory(&buildings, 40, 1)
}
