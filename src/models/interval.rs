//! Weekday, time-of-day, and time interval primitives.
//!
//! All times are minutes since midnight. A `TimeInterval` is a weekday plus
//! a half-open `[start, end)` range; two intervals conflict iff they share
//! a day and their ranges overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week with a stable ordinal (Mon = 0 .. Sun = 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Ordinal used for day ordering (Mon = 0).
    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        };
        f.write_str(name)
    }
}

/// A clock time as minutes since midnight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct TimeOfDay(pub u16);

impl TimeOfDay {
    /// Creates a time from hour and minute. Caps at 23:59.
    pub fn hm(hour: u16, minute: u16) -> Self {
        let h = hour.min(23);
        let m = minute.min(59);
        Self(h * 60 + m)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0-59).
    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A weekly-recurring time interval: a weekday plus a half-open time range.
///
/// Invariant: `start < end`. Construct through [`TimeInterval::new`], which
/// rejects empty and inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Day of the week this interval recurs on.
    pub day: Weekday,
    /// Interval start (inclusive).
    pub start: TimeOfDay,
    /// Interval end (exclusive).
    pub end: TimeOfDay,
}

impl TimeInterval {
    /// Creates an interval, returning `None` when `start >= end`.
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        if start < end {
            Some(Self { day, start, end })
        } else {
            None
        }
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end.0 - self.start.0
    }

    /// Whether two intervals conflict: same day and overlapping half-open ranges.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}
