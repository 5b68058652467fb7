//! # Gatherly Core Library
//!
//! This library provides the scheduling and matching engines for Gatherly:
//! finding a common meeting time for a small group of people out of
//! individually submitted availability windows, and scoring users or groups
//! for social compatibility from shared interests, schedule overlap, and
//! personality traits inferred from bios.
//!
//! ## Architecture
//!
//! - **Interval Utilities**: timezone normalization, clamping, merging, and
//!   the two-pointer overlap sweep shared by both engines
//! - **Availability Store**: in-memory windows indexed by `(group, user)`
//!   with overlap-replace-on-insert semantics
//! - **Meeting Suggestion Engine**: sweep-line search for conflict-free
//!   slots plus a ranked best-effort fallback
//! - **Compatibility Scoring Engine**: weighted interest/schedule/trait
//!   scoring for user-vs-user and group-vs-group matching
//!
//! Everything is pure, synchronous, and in-memory: the engines perform no
//! I/O, hold no shared mutable state, and every call is independent. A web
//! or CLI layer owns persistence and payload translation.
//!
//! ## Key Components
//!
//! - [`MeetingScheduler`]: meeting suggestion engine
//! - [`MatchingEngine`]: compatibility scoring engine
//! - [`AvailabilityStore`]: availability window arena
//! - [`Settings`]: injected engine configuration (no process-wide state)

pub mod availability;
pub mod config;
pub mod error;
pub mod interval;
pub mod matching;
pub mod scheduling;

pub use availability::{AvailabilityStore, AvailabilityWindow, ConfirmedMeeting, GroupId, UserId};
pub use config::Settings;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use interval::Interval;
pub use matching::{CompatibilityProfile, CompatibilityScore, MatchingEngine};
pub use scheduling::{
    confirm_meeting, MeetingPreferences, MeetingScheduler, MeetingSuggestion,
};
