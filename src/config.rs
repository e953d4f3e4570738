//! Engine configuration.
//!
//! Knobs for the allocation cascade and its repair passes. Defaults match
//! the campus the engine was built for: accessible rooms on floor 1, three
//! optimizer iterations, per-day fallback enabled, early-morning starts at
//! 07:00/08:00/09:00, floor exchange considered for floors 2 through 4.

use serde::{Deserialize, Serialize};

use crate::models::TimeOfDay;

/// Configuration for an allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on optimizer repair iterations.
    pub optimizer_iterations: usize,
    /// Whether groups that cannot be placed weekly or split fall back to
    /// independent per-day assignment.
    pub per_day_fallback: bool,
    /// Floor accessibility-requiring and priority groups must be placed on.
    pub accessible_floor: u8,
    /// Start times that mark a group as early-morning.
    pub early_start_times: Vec<TimeOfDay>,
    /// Floors from which the exchange pass tries to move early-morning
    /// groups down: `(lowest, highest)`, inclusive.
    pub exchange_floors: (u8, u8),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            optimizer_iterations: 3,
            per_day_fallback: true,
            accessible_floor: 1,
            early_start_times: vec![
                TimeOfDay::hm(7, 0),
                TimeOfDay::hm(8, 0),
                TimeOfDay::hm(9, 0),
            ],
            exchange_floors: (2, 4),
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the optimizer iteration bound.
    pub fn with_optimizer_iterations(mut self, iterations: usize) -> Self {
        self.optimizer_iterations = iterations;
        self
    }

    /// Enables or disables the per-day fallback strategy.
    pub fn with_per_day_fallback(mut self, enabled: bool) -> Self {
        self.per_day_fallback = enabled;
        self
    }

    /// Sets the accessible floor.
    pub fn with_accessible_floor(mut self, floor: u8) -> Self {
        self.accessible_floor = floor;
        self
    }

    /// Replaces the early-morning start-time set.
    pub fn with_early_start_times(mut self, times: Vec<TimeOfDay>) -> Self {
        self.early_start_times = times;
        self
    }

    /// Sets the inclusive floor range the exchange pass moves groups from.
    pub fn with_exchange_floors(mut self, lowest: u8, highest: u8) -> Self {
        self.exchange_floors = (lowest, highest);
        self
    }

    /// Whether a start time counts as early-morning.
    pub fn is_early_start(&self, start: TimeOfDay) -> bool {
        self.early_start_times.contains(&start)
    }

    /// Whether a floor is in the exchange range.
    pub fn is_exchange_floor(&self, floor: u8) -> bool {
        let (lo, hi) = self.exchange_floors;
        floor >= lo && floor <= hi
    }
}
