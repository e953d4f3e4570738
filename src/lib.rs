//! Weekly classroom allocation engine.
//!
//! Assigns physical rooms to recurring weekly class sessions under capacity,
//! accessibility, floor-policy, and time-conflict constraints. The engine is
//! a greedy, deterministic, explainable heuristic: groups are ordered, then
//! each walks a strategy cascade — whole-week single room, exhaustive
//! single-room retry, two-room weekly split, per-day fallback — and leftover
//! failures go through a bounded repair pass and a floor-exchange pass.
//! Failure is non-fatal: unresolved groups are logged and reported, never
//! aborted on.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeInterval`, `Room`, `Group`,
//!   `ClassSession`, outcome records
//! - **`classify`**: Lab/virtual routing; lab and virtual sessions never
//!   consume a room
//! - **`ordering`**: Deterministic group ordering for the allocator
//! - **`availability`** / **`selection`**: Hard-constraint checking and
//!   soft-preference room ranking
//! - **`engine`**: `AllocationRun`, the owned context driving the pipeline
//! - **`ingest`** / **`inventory`** / **`validation`**: Input construction
//!   and integrity checks
//!
//! # Example
//!
//! ```
//! use room_schedule::engine::AllocationRun;
//! use room_schedule::ingest::{ingest, SessionRow};
//! use room_schedule::inventory::default_campus;
//! use room_schedule::models::{Modality, TimeOfDay, Weekday};
//!
//! let rows = vec![SessionRow {
//!     group_id: "601".into(),
//!     subject_code: "INF-601".into(),
//!     subject_name: "Databases".into(),
//!     day: Weekday::Mon,
//!     start: TimeOfDay::hm(8, 0),
//!     end: TimeOfDay::hm(10, 0),
//!     modality: Modality::InPerson,
//!     required_capacity: 28,
//!     requires_accessibility: false,
//! }];
//!
//! let ingested = ingest(&rows).unwrap();
//! let mut run = AllocationRun::new(default_campus(), ingested);
//! run.run();
//! assert_eq!(run.report().assigned, 1);
//! ```

pub mod availability;
pub mod classify;
pub mod config;
pub mod engine;
pub mod ingest;
pub mod inventory;
pub mod models;
pub mod ordering;
pub mod selection;
pub mod validation;

mod allocator;
mod exchange;
mod optimizer;

pub use allocator::{weekly_requirement, GroupEvalError};
pub use config::EngineConfig;
pub use engine::AllocationRun;
