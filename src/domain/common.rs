//! The shared `Identifiable` trait and the inclusive date range used by budget periods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exposes the backend document identifier of a record.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Inclusive `[start, end]` range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Returns `None` when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}
