//! Engine settings.
//!
//! Every tunable the engines consume lives in [`Settings`], which is passed
//! into each engine's constructor. There is no process-global settings
//! object; callers that want different defaults per request construct a
//! different `Settings` value.
//!
//! Settings round-trip through TOML so the CLI can load them from a file.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

fn default_duration_minutes() -> i64 {
    60
}

fn default_window_days() -> i64 {
    14
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_lookahead_days() -> i64 {
    14
}

fn default_schedule_ceiling() -> i64 {
    240
}

fn default_size_penalty() -> i64 {
    15
}

fn default_interest_weight() -> f64 {
    0.6
}

fn default_schedule_weight() -> f64 {
    0.25
}

fn default_trait_weight() -> f64 {
    0.15
}

/// Tunable parameters for the suggestion and matching engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Default meeting length used when the caller omits a duration.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: i64,

    /// How many days ahead the scheduler searches for availabilities.
    #[serde(default = "default_window_days")]
    pub meeting_window_days: i64,

    /// Maximum number of meeting suggestions returned per request.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// How many days of availability the matching engine considers.
    #[serde(default = "default_lookahead_days")]
    pub match_lookahead_days: i64,

    /// Shared-schedule minutes at which the schedule score saturates at 1.0.
    #[serde(default = "default_schedule_ceiling")]
    pub schedule_ceiling_minutes: i64,

    /// Overlap-minute penalty per member of group size difference.
    #[serde(default = "default_size_penalty")]
    pub size_penalty_minutes: i64,

    /// Weight of the shared-interest term in the overall score.
    #[serde(default = "default_interest_weight")]
    pub interest_weight: f64,

    /// Weight of the schedule-overlap term in the overall score.
    #[serde(default = "default_schedule_weight")]
    pub schedule_weight: f64,

    /// Weight of the personality-trait term in the overall score.
    #[serde(default = "default_trait_weight")]
    pub trait_weight: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            meeting_window_days: default_window_days(),
            suggestion_limit: default_suggestion_limit(),
            match_lookahead_days: default_lookahead_days(),
            schedule_ceiling_minutes: default_schedule_ceiling(),
            size_penalty_minutes: default_size_penalty(),
            interest_weight: default_interest_weight(),
            schedule_weight: default_schedule_weight(),
            trait_weight: default_trait_weight(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document. Missing fields take defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a TOML document.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeFailed(e.to_string()).into())
    }

    /// Validate value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.default_duration_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "default_duration_minutes".to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        if self.meeting_window_days <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "meeting_window_days".to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        if self.match_lookahead_days <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "match_lookahead_days".to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        if self.schedule_ceiling_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "schedule_ceiling_minutes".to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        for (key, weight) in [
            ("interest_weight", self.interest_weight),
            ("schedule_weight", self.schedule_weight),
            ("trait_weight", self.trait_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be in [0.0, 1.0], got {weight}"),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_duration_minutes, 60);
        assert_eq!(settings.meeting_window_days, 14);
        assert_eq!(settings.suggestion_limit, 5);
        assert_eq!(settings.match_lookahead_days, 14);
        assert_eq!(settings.schedule_ceiling_minutes, 240);
        assert_eq!(settings.size_penalty_minutes, 15);
        assert!((settings.interest_weight + settings.schedule_weight + settings.trait_weight
            - 1.0)
            .abs()
            < 1e-9);
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let settings = Settings::from_toml("default_duration_minutes = 30\n").unwrap();
        assert_eq!(settings.default_duration_minutes, 30);
        assert_eq!(settings.meeting_window_days, 14);
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed = Settings::from_toml(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_rejects_bad_weight() {
        assert!(Settings::from_toml("interest_weight = 1.5\n").is_err());
    }

    #[test]
    fn test_rejects_zero_duration() {
        assert!(Settings::from_toml("default_duration_minutes = 0\n").is_err());
    }

    #[test]
    fn test_rejects_zero_lookahead() {
        assert!(Settings::from_toml("match_lookahead_days = 0\n").is_err());
    }
}
