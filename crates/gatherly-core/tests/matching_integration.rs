//! Integration tests for compatibility matching: user-vs-user and
//! group-vs-group candidate ranking.

use chrono::{DateTime, TimeZone, Utc};
use gatherly_core::{CompatibilityProfile, Interval, MatchingEngine, Settings};

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, h, 0, 0).unwrap()
}

fn iv(start_h: u32, end_h: u32) -> Interval {
    Interval::new(at(start_h), at(end_h)).unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn engine() -> MatchingEngine {
    MatchingEngine::new(Settings::default())
}

#[test]
fn test_group_pair_with_two_hour_overlap_and_equal_sizes() {
    // Two 2-member groups sharing a full 2-hour window: no size penalty,
    // positive overall score, schedule halfway to the 4-hour ceiling.
    let primary = CompatibilityProfile::for_group(
        "g-a",
        "Group A",
        2,
        &strings(&["board games"]),
        &strings(&["Planner who leads.", "Foodie"]),
        vec![iv(18, 20)],
    );
    let candidate = CompatibilityProfile::for_group(
        "g-b",
        "Group B",
        2,
        &strings(&["board games", "trivia"]),
        &strings(&["Spontaneous gamer"]),
        vec![iv(18, 20)],
    );

    let ranked = engine().score_candidates_at(at(9), &primary, &[candidate], true);
    assert_eq!(ranked.len(), 1);
    assert!(ranked[0].overall > 0.0);
    assert_eq!(ranked[0].schedule_score, 0.5);
    assert_eq!(ranked[0].shared_interests, vec!["board games".to_string()]);
}

#[test]
fn test_interest_score_matches_jaccard() {
    let primary = CompatibilityProfile::for_user(
        "u1",
        "Alex",
        &strings(&["hiking", "coffee"]),
        None,
        vec![],
    );
    let candidate = CompatibilityProfile::for_user(
        "u2",
        "Blair",
        &strings(&["coffee", "hiking", "tech"]),
        None,
        vec![],
    );
    let score = engine().score_pair(&primary, &candidate);
    assert_eq!(score.interest_score, 0.667); // 2 shared / 3 in union
}

#[test]
fn test_user_ranking_excludes_incompatible_and_orders_rest() {
    let alex = CompatibilityProfile::for_user(
        "alex",
        "Alex",
        &strings(&["hiking", "coffee", "films"]),
        Some("Outdoorsy and creative planner."),
        vec![iv(10, 12)],
    );
    let blair = CompatibilityProfile::for_user(
        "blair",
        "Blair",
        &strings(&["coffee", "hiking", "tech"]),
        Some("Creative extrovert who is outdoorsy."),
        vec![iv(10, 12)],
    );
    let casey = CompatibilityProfile::for_user(
        "casey",
        "Casey",
        &strings(&["gaming"]),
        Some("Stays indoors."),
        vec![],
    );

    let ranked = engine().score_candidates_at(at(9), &alex, &[casey, blair], false);
    assert_eq!(ranked.len(), 1, "no shared interests/traits/schedule excludes casey");
    assert_eq!(ranked[0].id, "blair");
    assert!(ranked[0].overall > 0.0);
}

#[test]
fn test_schedule_score_ceiling_saturates() {
    // 6 shared hours score no higher than 4.
    let primary = CompatibilityProfile::for_user(
        "u1",
        "Alex",
        &strings(&["chess"]),
        None,
        vec![iv(9, 15)],
    );
    let candidate = CompatibilityProfile::for_user(
        "u2",
        "Blair",
        &strings(&["chess"]),
        None,
        vec![iv(9, 15)],
    );
    let score = engine().score_pair_at(at(9), &primary, &candidate);
    assert_eq!(score.schedule_score, 1.0);
}

#[test]
fn test_group_size_penalty_reduces_schedule_term() {
    // 120 overlap minutes, size difference 1 -> effective 105 minutes.
    let primary = CompatibilityProfile::for_group(
        "g-a",
        "Trio",
        3,
        &strings(&["hiking"]),
        &[],
        vec![iv(10, 12)],
    );
    let candidate = CompatibilityProfile::for_group(
        "g-b",
        "Duo",
        2,
        &strings(&["hiking"]),
        &[],
        vec![iv(10, 12)],
    );
    let ranked = engine().score_candidates_at(at(9), &primary, &[candidate], true);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].schedule_score, 0.438); // 105/240 rounded
}

#[test]
fn test_empty_candidate_list_returns_empty() {
    let profile = CompatibilityProfile::for_user("u1", "Alex", &[], None, vec![]);
    assert!(engine().score_candidates(&profile, &[], false).is_empty());
}

#[test]
fn test_scoring_against_self_returns_empty() {
    let profile = CompatibilityProfile::for_user(
        "u1",
        "Alex",
        &strings(&["hiking"]),
        None,
        vec![],
    );
    let ranked = engine().score_candidates(&profile, std::slice::from_ref(&profile), false);
    assert!(ranked.is_empty());
}

#[test]
fn test_disjoint_schedules_still_match_on_interests() {
    let primary = CompatibilityProfile::for_user(
        "u1",
        "Alex",
        &strings(&["hiking"]),
        None,
        vec![iv(9, 10)],
    );
    let candidate = CompatibilityProfile::for_user(
        "u2",
        "Blair",
        &strings(&["hiking"]),
        None,
        vec![iv(18, 19)],
    );
    let ranked = engine().score_candidates_at(at(9), &primary, &[candidate], false);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].schedule_score, 0.0);
    assert_eq!(ranked[0].overall, 0.6); // interest term only
}

#[test]
fn test_windows_beyond_lookahead_do_not_score() {
    // Both groups share six hours of availability, but only months past the
    // 14-day lookahead horizon. That overlap must not count: with zero
    // effective overlap the equal-size pair is excluded outright.
    let far = Utc.with_ymd_and_hms(2027, 1, 10, 9, 0, 0).unwrap();
    let far_window = Interval::new(far, far + chrono::Duration::hours(6)).unwrap();
    let primary = CompatibilityProfile::for_group(
        "g-a",
        "Group A",
        2,
        &strings(&["board games"]),
        &[],
        vec![far_window],
    );
    let candidate = CompatibilityProfile::for_group(
        "g-b",
        "Group B",
        2,
        &strings(&["board games"]),
        &[],
        vec![far_window],
    );

    let ranked = engine().score_candidates_at(at(9), &primary, &[candidate.clone()], true);
    assert!(ranked.is_empty());

    // User mode keeps the candidate (interests still match) but the far
    // overlap contributes nothing to the schedule term.
    let score = engine().score_pair_at(at(9), &primary, &candidate);
    assert_eq!(score.schedule_score, 0.0);
    assert_eq!(score.overall, 0.6);
}
