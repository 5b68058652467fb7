//! In-memory availability store.
//!
//! Holds raw availability windows submitted by group members, indexed by
//! `(group, user)`. The store owns the one mutation-adjacent rule of the
//! system: a newly submitted window that temporally overlaps an existing
//! window for the same `(group, user)` pair *replaces* the overlapping
//! window (last-write-wins per overlap, never a merge of the two).
//!
//! Confirmed meetings are recorded here as well. Confirmed meetings are
//! immutable once created and are deliberately allowed to overlap each
//! other; the store never cross-checks them.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::interval::{normalize_local, resolve_timezone, Interval};

/// Unique identifier for a user.
pub type UserId = String;

/// Unique identifier for a group.
pub type GroupId = String;

/// A single availability window submitted by a group member.
///
/// Timestamps are stored normalized to UTC; the submitted timezone is
/// retained as a label only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: String,
    pub group_id: GroupId,
    pub user_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub timezone: String,
}

impl AvailabilityWindow {
    /// View this window as a plain interval.
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// A confirmed group meeting.
///
/// Created only through [`crate::scheduling::confirm_meeting`]; immutable
/// once created (there is no update path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedMeeting {
    pub id: String,
    pub group_id: GroupId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub suggested_by: Option<UserId>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// In-memory arena of availability windows and confirmed meetings.
///
/// Windows are bucketed by `(group, user)`; overlap checks on insert are a
/// linear scan within the bucket, which stays small (one person's windows
/// for one group).
#[derive(Debug, Default)]
pub struct AvailabilityStore {
    windows: HashMap<(GroupId, UserId), Vec<AvailabilityWindow>>,
    meetings: Vec<ConfirmedMeeting>,
}

impl AvailabilityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit an availability window.
    ///
    /// Both timestamps are interpreted as local times in `timezone` (unknown
    /// identifiers fall back to UTC) and normalized to UTC. Rejects empty or
    /// inverted ranges. Existing windows for the same `(group, user)` that
    /// overlap the new one are deleted before the insert.
    pub fn add_window(
        &mut self,
        group_id: &str,
        user_id: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        timezone: &str,
    ) -> Result<AvailabilityWindow> {
        let tz = resolve_timezone(timezone);
        let start_utc = normalize_local(start_time, tz);
        let end_utc = normalize_local(end_time, tz);

        if end_utc <= start_utc {
            return Err(ValidationError::InvalidTimeRange {
                start: start_utc,
                end: end_utc,
            }
            .into());
        }

        let window = AvailabilityWindow {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            start_time: start_utc,
            end_time: end_utc,
            timezone: timezone.to_string(),
        };

        let bucket = self
            .windows
            .entry((group_id.to_string(), user_id.to_string()))
            .or_default();
        bucket.retain(|existing| !existing.interval().overlaps(&window.interval()));
        bucket.push(window.clone());
        bucket.sort_by_key(|w| w.start_time);

        Ok(window)
    }

    /// List all windows submitted for a group, across members,
    /// ordered by start time then user id.
    pub fn list_group_windows(&self, group_id: &str) -> Vec<AvailabilityWindow> {
        let mut windows: Vec<AvailabilityWindow> = self
            .windows
            .iter()
            .filter(|((group, _), _)| group == group_id)
            .flat_map(|(_, bucket)| bucket.iter().cloned())
            .collect();
        windows.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        windows
    }

    /// List one member's windows for a group, ordered by start time.
    pub fn list_user_windows(&self, group_id: &str, user_id: &str) -> Vec<AvailabilityWindow> {
        self.windows
            .get(&(group_id.to_string(), user_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Drop all windows for a group.
    pub fn remove_group(&mut self, group_id: &str) {
        self.windows.retain(|(group, _), _| group != group_id);
    }

    /// Total number of stored windows.
    pub fn window_count(&self) -> usize {
        self.windows.values().map(Vec::len).sum()
    }

    /// Record a confirmed meeting.
    pub fn record_meeting(&mut self, meeting: ConfirmedMeeting) {
        self.meetings.push(meeting);
    }

    /// List confirmed meetings for a group in creation order.
    pub fn list_meetings(&self, group_id: &str) -> Vec<&ConfirmedMeeting> {
        self.meetings
            .iter()
            .filter(|m| m.group_id == group_id)
            .collect()
    }
}
