//! Keyword-based personality trait extraction.

use std::collections::BTreeSet;

/// Fixed trait vocabulary matched against member bios.
pub const TRAIT_VOCABULARY: [&str; 12] = [
    "introvert",
    "extrovert",
    "outdoorsy",
    "bookworm",
    "creative",
    "athletic",
    "foodie",
    "gamer",
    "leader",
    "planner",
    "spontaneous",
    "musician",
];

/// Extract traits from a free-text bio.
///
/// Case-insensitive substring containment against the lowercased bio; no
/// stemming or fuzzy matching. An empty bio yields an empty set.
pub fn extract_traits(bio: &str) -> BTreeSet<String> {
    let lowered = bio.to_lowercase();
    TRAIT_VOCABULARY
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}
