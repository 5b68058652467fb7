//! Best-effort fallback pass: ranked partial-coverage slots.

use chrono::Duration;

use crate::availability::UserId;
use crate::interval::Interval;

use super::{availability_lookup, participants_for_slot, MeetingSuggestion, MemberWindow};

/// Candidate slot with its coverage score, kept alongside the owning
/// window's user id for a deterministic tie-break.
struct ScoredSlot {
    score: f64,
    owner: UserId,
    suggestion: MeetingSuggestion,
}

/// Collect up to `needed` partial-coverage suggestions.
///
/// For every window, takes its first duration-length sub-slot and counts
/// which members have a contiguous window covering it. Slots shorter than
/// the duration are skipped, as are fully covered slots (those belong to
/// the conflict-free pass). Candidates are ranked by descending coverage;
/// ties break on earlier start time, then owning member id.
pub(super) fn collect_best_effort(
    windows: &[MemberWindow],
    member_ids: &[UserId],
    duration: Duration,
    needed: usize,
) -> Vec<MeetingSuggestion> {
    let lookup = availability_lookup(windows);
    let member_count = member_ids.len();

    let mut scored: Vec<ScoredSlot> = Vec::new();
    for window in windows {
        let slot_start = window.interval.start;
        let slot_end = window.interval.end.min(slot_start + duration);
        if slot_end - slot_start < duration {
            continue;
        }
        let slot = Interval {
            start: slot_start,
            end: slot_end,
        };
        let participants = participants_for_slot(slot, member_ids, &lookup);
        if participants.len() == member_count {
            // Already captured by the conflict-free pass.
            continue;
        }
        let score = participants.len() as f64 / member_count as f64;
        let mut conflicts: Vec<UserId> = member_ids
            .iter()
            .filter(|member| !participants.contains(*member))
            .cloned()
            .collect();
        conflicts.sort();
        scored.push(ScoredSlot {
            score,
            owner: window.user_id.clone(),
            suggestion: MeetingSuggestion {
                start_time: slot.start,
                end_time: slot.end,
                participant_ids: participants,
                conflict_ids: conflicts,
            },
        });
    }

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.suggestion.start_time.cmp(&b.suggestion.start_time))
            .then_with(|| a.owner.cmp(&b.owner))
    });
    scored
        .into_iter()
        .take(needed)
        .map(|slot| slot.suggestion)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

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
    fn test_partial_coverage_ranked_by_score() {
        let members = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(10, 0)),
            mw("b", at(9, 0), at(10, 0)),
            mw("c", at(14, 0), at(15, 0)),
        ];
        let slots = collect_best_effort(&windows, &members, Duration::minutes(30), 5);

        assert!(!slots.is_empty());
        // Two-of-three coverage outranks one-of-three.
        assert_eq!(slots[0].participant_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(slots[0].conflict_ids, vec!["c".to_string()]);
        assert_eq!(slots[0].start_time, at(9, 0));
    }

    #[test]
    fn test_full_coverage_slots_are_skipped() {
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(10, 0)),
            mw("b", at(9, 0), at(10, 0)),
        ];
        let slots = collect_best_effort(&windows, &members, Duration::minutes(30), 5);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_short_windows_are_skipped() {
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(9, 20)),
            mw("b", at(14, 0), at(15, 0)),
        ];
        let slots = collect_best_effort(&windows, &members, Duration::minutes(30), 5);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start_time, at(14, 0));
    }

    #[test]
    fn test_tie_breaks_on_start_time() {
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("b", at(14, 0), at(15, 0)),
            mw("a", at(9, 0), at(10, 0)),
        ];
        let slots = collect_best_effort(&windows, &members, Duration::minutes(60), 5);
        // Equal half-coverage scores: earlier slot wins regardless of input order.
        assert_eq!(slots[0].start_time, at(9, 0));
        assert_eq!(slots[1].start_time, at(14, 0));
    }

    #[test]
    fn test_needed_caps_output() {
        let members = vec!["a".to_string(), "b".to_string()];
        let windows = vec![
            mw("a", at(9, 0), at(10, 0)),
            mw("a", at(11, 0), at(12, 0)),
            mw("a", at(13, 0), at(14, 0)),
        ];
        let slots = collect_best_effort(&windows, &members, Duration::minutes(30), 2);
        assert_eq!(slots.len(), 2);
    }
}
