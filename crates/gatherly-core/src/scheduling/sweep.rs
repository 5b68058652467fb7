//! Conflict-free pass: sweep line over window open/close events.

use chrono::{DateTime, Duration, Utc};

use crate::availability::UserId;
use crate::interval::Interval;

use super::{availability_lookup, participants_for_slot, MeetingSuggestion, MemberWindow};

/// Collect up to `limit` conflict-free suggestions.
///
/// Builds `+1` events at window starts and `-1` at window ends, sorted by
/// `(time, -delta)` so openings at a timestamp are counted before closings.
/// An instant where one member's window ends exactly as another begins is
/// therefore not treated as a gap. Whenever the open-window count reaches
/// the full member count an interval opens; when it drops back below, the
/// interval is sliced into back-to-back duration-length slots.
///
/// A slot is kept only if every member has a single contiguous window
/// covering it. The raw count can report full coverage across the join of
/// two disjoint windows from the same member; the per-member re-check
/// guards against that false signal.
pub(super) fn collect_conflict_free(
    windows: &[MemberWindow],
    member_ids: &[UserId],
    duration: Duration,
    limit: usize,
) -> Vec<MeetingSuggestion> {
    let mut events: Vec<(DateTime<Utc>, i32)> = Vec::with_capacity(windows.len() * 2);
    for window in windows {
        events.push((window.interval.start, 1));
        events.push((window.interval.end, -1));
    }
    events.sort_by_key(|&(time, delta)| (time, -delta));

    let lookup = availability_lookup(windows);
    let target = member_ids.len() as i32;

    let mut active_count: i32 = 0;
    let mut interval_start: Option<DateTime<Utc>> = None;
    let mut full_slots: Vec<MeetingSuggestion> = Vec::new();

    for (timestamp, delta) in events {
        let prev_count = active_count;
        active_count += delta;

        if prev_count < target && active_count == target {
            interval_start = Some(timestamp);
        } else if prev_count == target && active_count < target {
            if let Some(start) = interval_start.take() {
                split_interval(
                    start,
                    timestamp,
                    duration,
                    member_ids,
                    &lookup,
                    limit,
                    &mut full_slots,
                );
            }
        }

        if full_slots.len() >= limit {
            break;
        }
    }
    full_slots.truncate(limit);
    full_slots
}

/// Slice `[start, end)` into back-to-back duration-length slots, keeping
/// only those contiguously covered by every member.
fn split_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration: Duration,
    member_ids: &[UserId],
    lookup: &std::collections::HashMap<&str, Vec<Interval>>,
    limit: usize,
    out: &mut Vec<MeetingSuggestion>,
) {
    let mut current = start;
    while current + duration <= end && out.len() < limit {
        let slot = Interval {
            start: current,
            end: current + duration,
        };
        let participants = participants_for_slot(slot, member_ids, lookup);
        if participants.len() == member_ids.len() {
            out.push(MeetingSuggestion {
                start_time: slot.start,
                end_time: slot.end,
                participant_ids: participants,
                conflict_ids: Vec::new(),
            });
        }
        current += duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn mw(user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> MemberWindow {
        MemberWindow {
            user_id: user_id.to_string(),
            interval: Interval { start, end },
        }
    }

    #[test]
    fn test_sweep_finds_common_interval() {
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(12, 0)),
            mw("b", at(10, 0), at(11, 0)),
        ];
        let slots = collect_conflict_free(&windows, &members, Duration::minutes(60), 5);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start_time, at(10, 0));
        assert_eq!(slots[0].end_time, at(11, 0));
        assert_eq!(slots[0].participant_ids, members);
    }

    #[test]
    fn test_sweep_respects_tie_ordering() {
        // b's opening coincides with a's closing elsewhere; sorting openings
        // first keeps the active count from dipping spuriously.
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(10, 0)),
            mw("a", at(10, 0), at(12, 0)),
            mw("b", at(9, 30), at(11, 30)),
        ];
        let slots = collect_conflict_free(&windows, &members, Duration::minutes(30), 5);
        // One shared run from 9:30 to 11:30, sliced into four slots.
        let starts: Vec<_> = slots.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![at(9, 30), at(10, 0), at(10, 30), at(11, 0)]);
    }

    #[test]
    fn test_sweep_no_common_time() {
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(10, 0)),
            mw("b", at(10, 0), at(11, 0)),
        ];
        let slots = collect_conflict_free(&windows, &members, Duration::minutes(30), 5);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_sweep_interval_shorter_than_duration() {
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(9, 45)),
            mw("b", at(9, 0), at(9, 45)),
        ];
        let slots = collect_conflict_free(&windows, &members, Duration::minutes(60), 5);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_sweep_stops_at_limit() {
        let members = vec!["a".to_string()];
        let windows = vec![mw("a", at(8, 0), at(20, 0))];
        let slots = collect_conflict_free(&windows, &members, Duration::minutes(30), 2);
        assert_eq!(slots.len(), 2);
    }
}
