//! Time ranges, overlap detection and date formatting.

use crate::booking::{Booking, BookingStatus};
use crate::Id;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeSet;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Parse both ends; `None` when either is not a timestamp.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self::new(parse_timestamp(start)?, parse_timestamp(end)?))
    }

    /// `true` iff `self.start < other.end && other.start < self.end`.
    ///
    /// Touching ranges do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) or a bare
/// date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Long human format, e.g. `March 5, 2025, 09:00`. Unparseable input is
/// returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%B %-d, %Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Ids of bookings that overlap another booking for the same listing.
///
/// Rejected bookings never count, and a booking is never compared with
/// itself. Bookings with unparseable times are skipped.
pub fn find_overlaps(bookings: &[Booking]) -> BTreeSet<Id> {
    let candidates: Vec<(&Booking, TimeRange)> = bookings
        .iter()
        .filter(|b| b.status() != BookingStatus::Rejected)
        .filter_map(|b| b.interval().map(|range| (b, range)))
        .collect();

    let mut flagged = BTreeSet::new();
    for (i, (a, ra)) in candidates.iter().enumerate() {
        for (b, rb) in &candidates[i + 1..] {
            if a.id != b.id && a.room_id == b.room_id && ra.overlaps(rb) {
                flagged.insert(a.id);
                flagged.insert(b.id);
            }
        }
    }
    flagged
}
