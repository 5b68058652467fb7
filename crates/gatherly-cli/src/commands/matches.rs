use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use serde::Deserialize;

use gatherly_core::interval::parse_timestamp;
use gatherly_core::matching::extract_traits;
use gatherly_core::{CompatibilityProfile, Interval, MatchingEngine, Settings};

#[derive(Subcommand)]
pub enum MatchAction {
    /// Rank candidate profiles against a primary profile
    Candidates {
        /// Path to a JSON file with primary and candidates
        #[arg(long)]
        input: PathBuf,
        /// Apply the group size-difference penalty
        #[arg(long)]
        groups: bool,
        /// Maximum number of candidates to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Extract personality traits from a bio
    Traits { bio: String },
}

/// Input document for `match candidates`.
#[derive(Deserialize)]
struct CandidatesInput {
    primary: ProfileEntry,
    candidates: Vec<ProfileEntry>,
}

fn default_member_count() -> usize {
    1
}

#[derive(Deserialize)]
struct ProfileEntry {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default = "default_member_count")]
    member_count: usize,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    bios: Vec<String>,
    #[serde(default)]
    windows: Vec<WindowRange>,
}

/// A UTC availability range; naive timestamps are treated as UTC.
#[derive(Deserialize)]
struct WindowRange {
    start_time: String,
    end_time: String,
}

fn build_profile(entry: &ProfileEntry) -> Result<CompatibilityProfile, Box<dyn std::error::Error>> {
    let mut windows = Vec::with_capacity(entry.windows.len());
    for range in &entry.windows {
        let start = parse_timestamp(&range.start_time)?;
        let end = parse_timestamp(&range.end_time)?;
        let interval = Interval::new(start, end)
            .ok_or_else(|| format!("empty or inverted window for profile '{}'", entry.id))?;
        windows.push(interval);
    }
    let name = entry.display_name.clone().unwrap_or_else(|| entry.id.clone());

    let profile = if entry.member_count <= 1 {
        CompatibilityProfile::for_user(
            &entry.id,
            &name,
            &entry.interests,
            entry.bios.first().map(String::as_str),
            windows,
        )
    } else {
        CompatibilityProfile::for_group(
            &entry.id,
            &name,
            entry.member_count,
            &entry.interests,
            &entry.bios,
            windows,
        )
    };
    Ok(profile)
}

pub fn run(action: MatchAction, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MatchAction::Candidates {
            input,
            groups,
            limit,
        } => {
            let document: CandidatesInput = serde_json::from_str(&fs::read_to_string(input)?)?;
            let primary = build_profile(&document.primary)?;
            let candidates: Vec<CompatibilityProfile> = document
                .candidates
                .iter()
                .map(build_profile)
                .collect::<Result<_, _>>()?;

            let engine = MatchingEngine::new(settings.clone());
            let mut ranked = engine.score_candidates(&primary, &candidates, groups);
            ranked.truncate(limit.unwrap_or(settings.suggestion_limit));
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
        MatchAction::Traits { bio } => {
            let traits = extract_traits(&bio);
            println!("{}", serde_json::to_string_pretty(&traits)?);
        }
    }
    Ok(())
}
