//! Interval utilities shared by the suggestion and matching engines.
//!
//! Everything downstream works on half-open UTC intervals `[start, end)`.
//! This module owns timezone normalization, clamping to a search window,
//! merging per-person windows into disjoint runs, and the two-pointer
//! overlap sweep used by the schedule-compatibility score.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// A half-open UTC time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Create a new interval. Returns `None` when the range is empty or inverted.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        if end > start {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this interval overlaps another (shared boundary does not count).
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Check if this interval fully contains `[start, end)`.
    pub fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= start && self.end >= end
    }

    /// Clamp to a search window. Returns `None` when the clamped interval
    /// is empty or inverted.
    pub fn clamp(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Option<Self> {
        Interval::new(self.start.max(window_start), self.end.min(window_end))
    }
}

/// Resolve an IANA timezone identifier.
///
/// Unknown identifiers fall back to UTC rather than failing; submitting
/// a window with a bad zone label should degrade, not reject.
pub fn resolve_timezone(name: &str) -> Tz {
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::debug!(zone = name, "unknown timezone identifier, falling back to UTC");
            Tz::UTC
        }
    }
}

/// Attach a zone to a naive local timestamp and convert to UTC.
///
/// Ambiguous local times (DST fold) resolve to the earlier instant;
/// nonexistent local times (DST gap) are interpreted as already-UTC.
pub fn normalize_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

/// Parse a timestamp string into a UTC instant.
///
/// Accepts RFC 3339 when an offset is present; a naive timestamp
/// (`2026-03-01T18:00:00`) is treated as already UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = text.parse::<NaiveDateTime>() {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(ValidationError::InvalidTimestamp(text.to_string()).into())
}

/// Merge intervals into a disjoint, ascending, non-adjacent list.
///
/// Windows whose start is `<=` the current merged end are absorbed, so
/// touching intervals merge into one. Idempotent: merging merged output
/// returns it unchanged.
pub fn merge(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Total overlap in minutes between two disjoint, ascending interval lists.
///
/// Two-pointer sweep: the `b` cursor only ever advances past intervals that
/// end at or before the current `a` start, so the scan is `O(|a| + |b|)`
/// amortized. Symmetric in its arguments.
pub fn overlap_minutes(windows_a: &[Interval], windows_b: &[Interval]) -> i64 {
    let mut total = 0;
    let mut idx_b = 0;

    for a in windows_a {
        while idx_b < windows_b.len() && windows_b[idx_b].end <= a.start {
            idx_b += 1;
        }
        let mut j = idx_b;
        while j < windows_b.len() && windows_b[j].start < a.end {
            let start = a.start.max(windows_b[j].start);
            let end = a.end.min(windows_b[j].end);
            if end > start {
                total += (end - start).num_minutes();
            }
            j += 1;
        }
    }
    total
}
