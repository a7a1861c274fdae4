//! Study constraints chosen before submission.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-assessed level of the student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(format!(
                "unknown level '{other}' (expected Beginner, Intermediate or Advanced)"
            )),
        }
    }
}

/// Weeks, daily hours and level. Always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConstraints")]
pub struct StudyConstraints {
    weeks: u32,
    hours_per_day: f64,
    level: Level,
}

impl StudyConstraints {
    pub const DEFAULT_WEEKS: u32 = 4;
    pub const DEFAULT_HOURS_PER_DAY: f64 = 10.0;

    pub fn new(weeks: u32, hours_per_day: f64, level: Level) -> Result<Self, ValidationError> {
        Ok(Self {
            weeks: check_weeks(weeks)?,
            hours_per_day: check_hours(hours_per_day)?,
            level,
        })
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn with_weeks(self, weeks: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            weeks: check_weeks(weeks)?,
            ..self
        })
    }

    pub fn with_hours_per_day(self, hours_per_day: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            hours_per_day: check_hours(hours_per_day)?,
            ..self
        })
    }

    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }
}

impl Default for StudyConstraints {
    fn default() -> Self {
        Self {
            weeks: Self::DEFAULT_WEEKS,
            hours_per_day: Self::DEFAULT_HOURS_PER_DAY,
            level: Level::Beginner,
        }
    }
}

/// Unchecked wire form; deserialization goes through [`StudyConstraints::new`].
#[derive(Deserialize)]
struct RawConstraints {
    weeks: u32,
    hours_per_day: f64,
    #[serde(default)]
    level: Level,
}

impl TryFrom<RawConstraints> for StudyConstraints {
    type Error = ValidationError;

    fn try_from(raw: RawConstraints) -> Result<Self, Self::Error> {
        Self::new(raw.weeks, raw.hours_per_day, raw.level)
    }
}

fn check_weeks(weeks: u32) -> Result<u32, ValidationError> {
    if weeks == 0 {
        return Err(ValidationError::InvalidConstraint {
            field: "weeks",
            value: weeks.to_string(),
        });
    }
    Ok(weeks)
}

fn check_hours(hours: f64) -> Result<f64, ValidationError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(ValidationError::InvalidConstraint {
            field: "hours_per_day",
            value: hours.to_string(),
        });
    }
    Ok(hours)
}
