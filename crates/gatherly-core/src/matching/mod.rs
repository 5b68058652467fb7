//! Compatibility scoring engine.
//!
//! Scores a primary profile against a list of candidate profiles using
//! three weighted terms: shared interests (Jaccard), schedule overlap
//! minutes against a saturation ceiling, and personality-trait overlap
//! (Jaccard over traits extracted from bios). The same engine serves
//! user-vs-user and group-vs-group matching; group matching additionally
//! applies a size-difference penalty to the raw overlap minutes.
//!
//! Profiles are ephemeral: rebuilt on every scoring call, never cached.

mod score;
pub mod traits;

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::interval::{merge, overlap_minutes, Interval};

pub use traits::{extract_traits, TRAIT_VOCABULARY};

/// Derived scoring view of a user or group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityProfile {
    pub id: String,
    pub display_name: String,
    /// Number of people behind this profile; 1 for a user profile.
    pub member_count: usize,
    /// Lowercased, deduplicated interests.
    pub interests: BTreeSet<String>,
    /// Traits extracted from bios.
    pub traits: BTreeSet<String>,
    /// Merged, disjoint availability intervals.
    pub availability: Vec<Interval>,
}

impl CompatibilityProfile {
    /// Build a profile for a single user.
    pub fn for_user(
        id: &str,
        display_name: &str,
        interests: &[String],
        bio: Option<&str>,
        windows: Vec<Interval>,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            member_count: 1,
            interests: normalize_interests(interests),
            traits: extract_traits(bio.unwrap_or("")),
            availability: merge(windows),
        }
    }

    /// Build a profile for a group: member interests and bios are unioned,
    /// the group's windows merged.
    pub fn for_group(
        id: &str,
        display_name: &str,
        member_count: usize,
        interests: &[String],
        bios: &[String],
        windows: Vec<Interval>,
    ) -> Self {
        let mut traits = BTreeSet::new();
        for bio in bios {
            traits.extend(extract_traits(bio));
        }
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            member_count,
            interests: normalize_interests(interests),
            traits,
            availability: merge(windows),
        }
    }

    /// Total merged availability in minutes.
    pub fn availability_minutes(&self) -> i64 {
        self.availability.iter().map(Interval::duration_minutes).sum()
    }
}

fn normalize_interests(interests: &[String]) -> BTreeSet<String> {
    interests
        .iter()
        .map(|interest| interest.trim().to_lowercase())
        .filter(|interest| !interest.is_empty())
        .collect()
}

/// Compatibility of one candidate against the primary profile.
///
/// All scores are rounded to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub id: String,
    pub display_name: String,
    /// Weighted combination of the three sub-scores, in `[0, 1]`.
    pub overall: f64,
    pub interest_score: f64,
    pub schedule_score: f64,
    pub trait_score: f64,
    /// Interests present on both sides, sorted.
    pub shared_interests: Vec<String>,
}

/// Compatibility scoring engine.
pub struct MatchingEngine {
    settings: Settings,
}

impl MatchingEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Score a single pair with no exclusion rules applied, anchored at
    /// the current wall clock.
    ///
    /// Used for detail views of an already-established match, where even a
    /// zero score should be shown rather than filtered.
    pub fn score_pair(
        &self,
        primary: &CompatibilityProfile,
        other: &CompatibilityProfile,
    ) -> CompatibilityScore {
        self.score_pair_at(Utc::now(), primary, other)
    }

    /// Score a single pair relative to an explicit reference instant.
    pub fn score_pair_at(
        &self,
        now: DateTime<Utc>,
        primary: &CompatibilityProfile,
        other: &CompatibilityProfile,
    ) -> CompatibilityScore {
        let primary_windows = self.lookahead_windows(now, primary);
        let overlap = overlap_minutes(&primary_windows, &self.lookahead_windows(now, other));
        self.compute(primary, other, overlap)
    }

    /// Rank candidates against the primary profile, best first, anchored
    /// at the current wall clock.
    pub fn score_candidates(
        &self,
        primary: &CompatibilityProfile,
        candidates: &[CompatibilityProfile],
        penalize_size: bool,
    ) -> Vec<CompatibilityScore> {
        self.score_candidates_at(Utc::now(), primary, candidates, penalize_size)
    }

    /// Rank candidates relative to an explicit reference instant.
    ///
    /// Only availability inside the lookahead window
    /// `[now, now + match_lookahead_days]` counts toward the schedule term;
    /// windows beyond the horizon carry no weight. A candidate carrying the
    /// primary's own id is skipped. With `penalize_size` (group-vs-group),
    /// the raw overlap minutes are reduced by `|size_a - size_b| * penalty`
    /// and candidates whose penalized overlap is zero or negative are
    /// excluded entirely. Without it (user-vs-user) there is no penalty,
    /// and candidates scoring an overall of zero are excluded. Ties keep
    /// discovery order.
    pub fn score_candidates_at(
        &self,
        now: DateTime<Utc>,
        primary: &CompatibilityProfile,
        candidates: &[CompatibilityProfile],
        penalize_size: bool,
    ) -> Vec<CompatibilityScore> {
        let primary_windows = self.lookahead_windows(now, primary);
        let mut scores: Vec<CompatibilityScore> = Vec::new();
        for candidate in candidates {
            if candidate.id == primary.id {
                continue;
            }
            let overlap =
                overlap_minutes(&primary_windows, &self.lookahead_windows(now, candidate));
            let effective_overlap = if penalize_size {
                let size_diff =
                    primary.member_count.abs_diff(candidate.member_count) as i64;
                let penalized = overlap - size_diff * self.settings.size_penalty_minutes;
                if penalized <= 0 {
                    tracing::debug!(
                        candidate = %candidate.id,
                        overlap,
                        penalized,
                        "candidate excluded by size penalty"
                    );
                    continue;
                }
                penalized
            } else {
                overlap
            };

            let score = self.compute(primary, candidate, effective_overlap);
            if !penalize_size && score.overall <= 0.0 {
                continue;
            }
            scores.push(score);
        }

        // Stable sort: ties keep discovery order.
        scores.sort_by(|a, b| {
            b.overall
                .partial_cmp(&a.overall)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scores
    }

    /// Availability clamped to `[now, now + match_lookahead_days]`.
    fn lookahead_windows(
        &self,
        now: DateTime<Utc>,
        profile: &CompatibilityProfile,
    ) -> Vec<Interval> {
        let horizon = now + Duration::days(self.settings.match_lookahead_days);
        profile
            .availability
            .iter()
            .filter_map(|window| window.clamp(now, horizon))
            .collect()
    }

    fn compute(
        &self,
        primary: &CompatibilityProfile,
        other: &CompatibilityProfile,
        effective_overlap_minutes: i64,
    ) -> CompatibilityScore {
        let (interest_raw, shared_interests) =
            score::jaccard(&primary.interests, &other.interests);
        let (trait_raw, _) = score::jaccard(&primary.traits, &other.traits);
        let schedule_raw = score::schedule_score(
            effective_overlap_minutes,
            self.settings.schedule_ceiling_minutes,
        );

        let interest_score = score::round3(interest_raw);
        let schedule_score = score::round3(schedule_raw);
        let trait_score = score::round3(trait_raw);
        let overall = score::round3(
            self.settings.interest_weight * interest_score
                + self.settings.schedule_weight * schedule_score
                + self.settings.trait_weight * trait_score,
        );

        CompatibilityScore {
            id: other.id.clone(),
            display_name: other.display_name.clone(),
            overall,
            interest_score,
            schedule_score,
            trait_score,
            shared_interests,
        }
    }
}
