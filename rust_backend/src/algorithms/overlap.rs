//! Closed-interval overlap detection for calendar ranges.

use crate::models::DateRange;

/// Whether two closed date ranges share at least one day.
///
/// Ranges that only touch at a boundary day overlap: a professional leaving one
/// work on the 30th and starting another on the 30th is booked twice that day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use obras_rust::algorithms::overlaps;
/// use obras_rust::models::DateRange;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// let a = DateRange::new(d(3, 1), d(6, 30)).unwrap();
/// let b = DateRange::new(d(6, 30), d(8, 1)).unwrap();
/// let c = DateRange::new(d(7, 1), d(8, 1)).unwrap();
/// assert!(overlaps(&a, &b));
/// assert!(!overlaps(&a, &c));
/// ```
pub fn overlaps(a: &DateRange, b: &DateRange) -> bool {
    a.start <= b.end && b.start <= a.end
}

/// The shared days of two ranges, if any.
pub fn intersection(a: &DateRange, b: &DateRange) -> Option<DateRange> {
    if !overlaps(a, b) {
        return None;
    }
    Some(DateRange {
        start: a.start.max(b.start),
        end: a.end.min(b.end),
    })
}
