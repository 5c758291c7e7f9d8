//! TOML configuration.
//!
//! A configuration file describes the school day, the active rules and
//! the exam sessions. Every section and key is optional; missing values
//! take the defaults below.
//!
//! ```toml
//! [grid]
//! days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
//! start_time = "09:00"
//! periods_per_day = 8
//! period_minutes = 50
//!
//! [[grid.breaks]]
//! after_period = 4
//! name = "Lunch Break"
//! minutes = 50
//!
//! [rules]
//! avoid_consecutive_same_subject = true
//! weekly_rest_day = "Sun"
//! text = "Avoid consecutive classes of the same subject."
//!
//! [exam]
//! forenoon_start = "09:30"
//! afternoon_start = "14:00"
//! duration_hours = 3
//! ```
//!
//! Giving `breaks` replaces the default break list entirely.

use std::fs;
use std::path::Path;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{BreakSpec, TimeGrid, TimeGridLayout};
use crate::rules::SchedulingRules;
use crate::scheduler::{CombinedScheduler, ExamScheduler, SingleGroupScheduler};

/// Time format used for every clock value in the file.
const TIME_FORMAT: &str = "%H:%M";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has mistyped values.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A clock value is not in `HH:MM` form.
    #[error("Invalid time for '{field}': '{value}' (expected HH:MM)")]
    InvalidTime {
        /// Dotted key of the offending value.
        field: &'static str,
        /// Value as written.
        value: String,
    },
}

/// Complete configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// `[grid]` section.
    pub grid: GridSettings,
    /// `[rules]` section.
    pub rules: RuleSettings,
    /// `[exam]` section.
    pub exam: ExamSettings,
}

/// Weekly grid layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Day labels in display order.
    pub days: Vec<String>,
    /// Start of the first period, `HH:MM`.
    pub start_time: String,
    /// Teaching periods per day.
    pub periods_per_day: u32,
    /// Length of one teaching period in minutes.
    pub period_minutes: u32,
    /// Breaks between periods; replaces the defaults when given.
    pub breaks: Vec<BreakSpec>,
}

impl Default for GridSettings {
    fn default() -> Self {
        let layout = TimeGridLayout::default();
        Self {
            days: layout.days,
            start_time: layout.start.format(TIME_FORMAT).to_string(),
            periods_per_day: layout.periods_per_day,
            period_minutes: layout.period_minutes,
            breaks: layout.breaks,
        }
    }
}

/// Rule switches. `text` is run through the free-text shim and merged in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Keep a subject out of the period right after the same subject.
    pub avoid_consecutive_same_subject: bool,
    /// Weekday with no exams (e.g. "Sun").
    pub weekly_rest_day: Option<Weekday>,
    /// Free-text rules.
    pub text: Option<String>,
}

/// Exam session timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamSettings {
    /// Forenoon session start, `HH:MM`.
    pub forenoon_start: String,
    /// Afternoon session start, `HH:MM`.
    pub afternoon_start: String,
    /// Exam length in hours.
    pub duration_hours: u32,
}

impl Default for ExamSettings {
    fn default() -> Self {
        Self {
            forenoon_start: "09:30".to_string(),
            afternoon_start: "14:00".to_string(),
            duration_hours: 3,
        }
    }
}

impl TimetableConfig {
    /// Parses a TOML document and checks its clock values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TimetableConfig = toml::from_str(content)?;
        config.time_grid_layout()?;
        config.exam_session_times()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Layout generator for the configured school day.
    pub fn time_grid_layout(&self) -> Result<TimeGridLayout, ConfigError> {
        let start = parse_time("grid.start_time", &self.grid.start_time)?;
        Ok(TimeGridLayout::default()
            .with_days(self.grid.days.iter().cloned())
            .with_start(start)
            .with_periods(self.grid.periods_per_day, self.grid.period_minutes)
            .with_breaks(self.grid.breaks.clone()))
    }

    /// The configured weekly grid.
    pub fn time_grid(&self) -> Result<TimeGrid, ConfigError> {
        Ok(self.time_grid_layout()?.build())
    }

    /// Structured rules merged with whatever the free text enables.
    pub fn scheduling_rules(&self) -> SchedulingRules {
        let mut rules = SchedulingRules::new()
            .with_avoid_consecutive(self.rules.avoid_consecutive_same_subject);
        if let Some(day) = self.rules.weekly_rest_day {
            rules = rules.with_weekly_rest_day(day);
        }
        match &self.rules.text {
            Some(text) => rules.merge(SchedulingRules::from_text(text)),
            None => rules,
        }
    }

    /// Single-batch scheduler with the configured rules.
    pub fn single_scheduler(&self) -> SingleGroupScheduler {
        SingleGroupScheduler::new().with_rules(self.scheduling_rules())
    }

    /// Combined scheduler with the configured rules.
    pub fn combined_scheduler(&self) -> CombinedScheduler {
        CombinedScheduler::new().with_rules(self.scheduling_rules())
    }

    /// Exam scheduler with the configured rules and session timing.
    pub fn exam_scheduler(&self) -> Result<ExamScheduler, ConfigError> {
        let (forenoon, afternoon) = self.exam_session_times()?;
        Ok(ExamScheduler::new()
            .with_rules(self.scheduling_rules())
            .with_session_times(forenoon, afternoon)
            .with_duration_hours(self.exam.duration_hours))
    }

    fn exam_session_times(&self) -> Result<(NaiveTime, NaiveTime), ConfigError> {
        Ok((
            parse_time("exam.forenoon_start", &self.exam.forenoon_start)?,
            parse_time("exam.afternoon_start", &self.exam.afternoon_start)?,
        ))
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| ConfigError::InvalidTime {
        field,
        value: value.to_string(),
    })
}
