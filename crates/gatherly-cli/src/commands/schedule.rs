use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Subcommand;
use serde::Deserialize;

use gatherly_core::interval::parse_timestamp;
use gatherly_core::{
    confirm_meeting, AvailabilityStore, MeetingPreferences, MeetingScheduler, Settings,
};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Suggest meeting slots from a JSON availability file
    Suggest {
        /// Path to a JSON file with member_ids and windows
        #[arg(long)]
        input: PathBuf,
        /// Meeting length in minutes
        #[arg(long)]
        duration: Option<i64>,
        /// Search window in days
        #[arg(long)]
        days: Option<i64>,
        /// Maximum number of suggestions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Confirm a chosen slot as a group meeting
    Confirm {
        #[arg(long)]
        group: String,
        /// Start timestamp; RFC 3339, or naive treated as UTC
        #[arg(long)]
        start: String,
        /// End timestamp; RFC 3339, or naive treated as UTC
        #[arg(long)]
        end: String,
        /// Member who proposed the slot
        #[arg(long)]
        by: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
}

/// Input document for `schedule suggest`.
#[derive(Deserialize)]
struct SuggestInput {
    member_ids: Vec<String>,
    windows: Vec<WindowEntry>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// One submitted window; timestamps are local to `timezone`.
#[derive(Deserialize)]
struct WindowEntry {
    user_id: String,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    #[serde(default = "default_timezone")]
    timezone: String,
}

pub fn run(action: ScheduleAction, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Suggest {
            input,
            duration,
            days,
            limit,
        } => {
            let document: SuggestInput = serde_json::from_str(&fs::read_to_string(input)?)?;

            let mut store = AvailabilityStore::new();
            for entry in &document.windows {
                store.add_window(
                    "cli",
                    &entry.user_id,
                    entry.start_time,
                    entry.end_time,
                    &entry.timezone,
                )?;
            }

            let scheduler = MeetingScheduler::new(settings.clone());
            let defaults = scheduler.default_preferences();
            let prefs = MeetingPreferences {
                duration_minutes: duration.unwrap_or(defaults.duration_minutes),
                window_days: days.unwrap_or(defaults.window_days),
                limit: limit.unwrap_or(defaults.limit),
            };

            let suggestions = scheduler.suggest_meetings(
                &document.member_ids,
                &store.list_group_windows("cli"),
                &prefs,
            )?;
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        ScheduleAction::Confirm {
            group,
            start,
            end,
            by,
            note,
        } => {
            let start_time = parse_timestamp(&start)?;
            let end_time = parse_timestamp(&end)?;
            let meeting =
                confirm_meeting(&group, start_time, end_time, by.as_deref(), note.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&meeting)?);
        }
    }
    Ok(())
}
