//! Calendar date ranges used for contract schedules and staffing windows.
//!
//! Two shapes are modelled:
//!
//! - [`DateRange`]: a closed `[start, end]` interval with both ends known.
//! - [`AssignmentWindow`]: a staffing window whose end may be left open. An open
//!   window is never treated as infinite; it is resolved against the planned end
//!   date of the obra that governs it (see [`AssignmentWindow::resolve`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed calendar interval. Both boundary days belong to the range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use obras_rust::models::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// let range = DateRange::new(start, end).unwrap();
/// assert_eq!(range.days(), 122);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err(format!(
                "Range end ({}) must not be before start ({})",
                end, start
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of calendar days covered, counting both boundary days.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Staffing window with an optional end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentWindow {
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl AssignmentWindow {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Resolves the effective closed range.
    ///
    /// The window's own end wins; otherwise `fallback_end` (the governing obra's
    /// planned end date) is used. Returns `None` when neither is known or when the
    /// resolved end falls before the start.
    pub fn resolve(&self, fallback_end: Option<NaiveDate>) -> Option<DateRange> {
        let end = self.end.or(fallback_end)?;
        DateRange::new(self.start, end).ok()
    }
}
