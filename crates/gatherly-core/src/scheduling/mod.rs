//! Meeting suggestion engine.
//!
//! Turns a pile of per-member availability windows into an ordered list of
//! meeting suggestions:
//! - normalizes and clamps windows to the search window
//! - finds conflict-free slots with a sweep line over open/close events
//! - falls back to ranked partial-coverage slots when too few exist
//!
//! The engine is pure and synchronous; it operates entirely on
//! caller-supplied data and is safe to run concurrently across groups.

mod best_effort;
mod sweep;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::{AvailabilityWindow, ConfirmedMeeting, UserId};
use crate::config::Settings;
use crate::error::{Result, ValidationError};
use crate::interval::Interval;

/// Per-request knobs for meeting suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPreferences {
    /// Length of the suggested meeting in minutes.
    pub duration_minutes: i64,
    /// How many days ahead of the search window start to consider.
    pub window_days: i64,
    /// Maximum number of suggestions to return.
    pub limit: usize,
}

/// A suggested meeting slot.
///
/// `participant_ids` and `conflict_ids` are disjoint; for conflict-free
/// slots the conflict list is empty and every requested member appears as
/// a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSuggestion {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub participant_ids: Vec<UserId>,
    pub conflict_ids: Vec<UserId>,
}

impl MeetingSuggestion {
    /// Whether every requested member can attend.
    pub fn is_conflict_free(&self) -> bool {
        self.conflict_ids.is_empty()
    }
}

/// One member's clamped availability, the working unit of both passes.
#[derive(Debug, Clone)]
pub(crate) struct MemberWindow {
    pub user_id: UserId,
    pub interval: Interval,
}

/// Per-member sorted interval lookup shared by both suggestion passes.
pub(crate) fn availability_lookup(windows: &[MemberWindow]) -> HashMap<&str, Vec<Interval>> {
    let mut lookup: HashMap<&str, Vec<Interval>> = HashMap::new();
    for window in windows {
        lookup
            .entry(window.user_id.as_str())
            .or_default()
            .push(window.interval);
    }
    for intervals in lookup.values_mut() {
        intervals.sort_by_key(|iv| iv.start);
    }
    lookup
}

/// Members whose availability fully covers `[slot_start, slot_end)` with a
/// single contiguous window. Returned sorted for deterministic output.
pub(crate) fn participants_for_slot(
    slot: Interval,
    member_ids: &[UserId],
    lookup: &HashMap<&str, Vec<Interval>>,
) -> Vec<UserId> {
    let mut participants: Vec<UserId> = member_ids
        .iter()
        .filter(|member| {
            lookup
                .get(member.as_str())
                .is_some_and(|intervals| {
                    intervals.iter().any(|iv| iv.covers(slot.start, slot.end))
                })
        })
        .cloned()
        .collect();
    participants.sort();
    participants
}

/// Meeting suggestion engine.
pub struct MeetingScheduler {
    settings: Settings,
}

impl MeetingScheduler {
    /// Create a scheduler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Preferences used when the caller supplies none.
    pub fn default_preferences(&self) -> MeetingPreferences {
        MeetingPreferences {
            duration_minutes: self.settings.default_duration_minutes,
            window_days: self.settings.meeting_window_days,
            limit: self.settings.suggestion_limit,
        }
    }

    /// Suggest meeting slots, anchored at the current wall clock.
    pub fn suggest_meetings(
        &self,
        member_ids: &[UserId],
        windows: &[AvailabilityWindow],
        prefs: &MeetingPreferences,
    ) -> Result<Vec<MeetingSuggestion>> {
        self.suggest_meetings_at(Utc::now(), member_ids, windows, prefs)
    }

    /// Suggest meeting slots relative to an explicit reference instant.
    ///
    /// The search window starts at the earlier of `now` and the earliest
    /// submitted window, so already-submitted past windows still produce
    /// suggestions, and spans `window_days` from there.
    pub fn suggest_meetings_at(
        &self,
        now: DateTime<Utc>,
        member_ids: &[UserId],
        windows: &[AvailabilityWindow],
        prefs: &MeetingPreferences,
    ) -> Result<Vec<MeetingSuggestion>> {
        if member_ids.is_empty() {
            return Err(ValidationError::NoMembers.into());
        }
        if prefs.duration_minutes <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration_minutes".to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        if windows.is_empty() || prefs.limit == 0 {
            return Ok(Vec::new());
        }

        let earliest_start = windows
            .iter()
            .map(|w| w.start_time)
            .min()
            .expect("windows is non-empty");
        let window_start = now.min(earliest_start);
        let window_end = window_start + Duration::days(prefs.window_days);

        let clamped: Vec<MemberWindow> = windows
            .iter()
            .filter_map(|w| {
                w.interval()
                    .clamp(window_start, window_end)
                    .map(|interval| MemberWindow {
                        user_id: w.user_id.clone(),
                        interval,
                    })
            })
            .collect();
        if clamped.is_empty() {
            return Ok(Vec::new());
        }

        let duration = Duration::minutes(prefs.duration_minutes);
        let mut suggestions =
            sweep::collect_conflict_free(&clamped, member_ids, duration, prefs.limit);
        tracing::debug!(
            members = member_ids.len(),
            windows = clamped.len(),
            conflict_free = suggestions.len(),
            "conflict-free pass complete"
        );

        if suggestions.len() < prefs.limit {
            let fallback = best_effort::collect_best_effort(
                &clamped,
                member_ids,
                duration,
                prefs.limit - suggestions.len(),
            );
            tracing::debug!(fallback = fallback.len(), "best-effort pass complete");
            suggestions.extend(fallback);
        }
        suggestions.truncate(prefs.limit);
        Ok(suggestions)
    }
}

/// Confirm a chosen slot as a group meeting.
///
/// Validates `end > start` and stamps the creation time. No overlap check
/// against other confirmed meetings is performed; confirming two meetings
/// over the same time range is allowed.
pub fn confirm_meeting(
    group_id: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    suggested_by: Option<&str>,
    note: Option<&str>,
) -> Result<ConfirmedMeeting> {
    if end_time <= start_time {
        return Err(ValidationError::InvalidTimeRange {
            start: start_time,
            end: end_time,
        }
        .into());
    }
    Ok(ConfirmedMeeting {
        id: Uuid::new_v4().to_string(),
        group_id: group_id.to_string(),
        start_time,
        end_time,
        suggested_by: suggested_by.map(str::to_string),
        note: note.map(str::to_string),
        created_at: Utc::now(),
    })
}
