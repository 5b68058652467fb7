//! Score arithmetic for the compatibility engine.

use std::collections::BTreeSet;

/// Round to three decimal places, the precision every exposed score carries.
pub(super) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Jaccard similarity of two sets: `|shared| / |union|`, with the shared
/// elements returned in sorted order. Empty union scores zero.
pub(super) fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> (f64, Vec<String>) {
    let shared: Vec<String> = a.intersection(b).cloned().collect();
    let union_len = a.union(b).count();
    if union_len == 0 {
        return (0.0, shared);
    }
    (shared.len() as f64 / union_len as f64, shared)
}

/// Schedule score from shared minutes: linear up to the ceiling, then flat.
/// Overlap beyond the ceiling does not raise the score further; negative
/// effective overlap (possible after a size penalty) scores zero.
pub(super) fn schedule_score(effective_overlap_minutes: i64, ceiling_minutes: i64) -> f64 {
    if effective_overlap_minutes <= 0 {
        return 0.0;
    }
    (effective_overlap_minutes as f64 / ceiling_minutes as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(2.0 / 3.0), 0.667);
        assert_eq!(round3(0.5), 0.5);
        assert_eq!(round3(0.0004), 0.0);
    }

    #[test]
    fn test_jaccard_two_thirds() {
        let (score, shared) = jaccard(&set(&["hiking", "coffee"]), &set(&["coffee", "hiking", "tech"]));
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(shared, vec!["coffee".to_string(), "hiking".to_string()]);
    }

    #[test]
    fn test_jaccard_empty_union() {
        let (score, shared) = jaccard(&set(&[]), &set(&[]));
        assert_eq!(score, 0.0);
        assert!(shared.is_empty());
    }

    #[test]
    fn test_jaccard_disjoint() {
        let (score, _) = jaccard(&set(&["a"]), &set(&["b"]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_schedule_score_saturates() {
        assert_eq!(schedule_score(120, 240), 0.5);
        assert_eq!(schedule_score(240, 240), 1.0);
        assert_eq!(schedule_score(600, 240), 1.0);
        assert_eq!(schedule_score(0, 240), 0.0);
        assert_eq!(schedule_score(-30, 240), 0.0);
    }
}
