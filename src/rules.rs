//! Scheduling rules.
//!
//! [`SchedulingRules`] is the structured rule set the schedulers consume.
//! [`RuleText`] derives it from a free-text rules string by literal,
//! case-insensitive substring matching. The text path has no tokenizer
//! and no negation handling: "do not avoid consecutive classes" still
//! enables the adjacency rule.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Phrase enabling the no-repeat rule for adjacent periods.
const AVOID_CONSECUTIVE: &str = "avoid consecutive";

/// Phrase marking Sunday as the weekly rest day.
const SUNDAY: &str = "sunday";

/// Recognized behaviors for a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingRules {
    /// Never place a subject directly after the same subject for the same
    /// batch on the same day. Breaks reset adjacency.
    pub avoid_consecutive_same_subject: bool,
    /// Weekday on which no exams are held.
    pub weekly_rest_day: Option<Weekday>,
}

impl SchedulingRules {
    /// Creates a rule set with every rule disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience shim: derives rules from free text.
    pub fn from_text(text: &str) -> Self {
        RuleText::new(text).to_rules()
    }

    /// Enables or disables the adjacent-period rule.
    pub fn with_avoid_consecutive(mut self, enabled: bool) -> Self {
        self.avoid_consecutive_same_subject = enabled;
        self
    }

    /// Sets the weekly rest day.
    pub fn with_weekly_rest_day(mut self, day: Weekday) -> Self {
        self.weekly_rest_day = Some(day);
        self
    }

    /// Combines two rule sets; a rule is active if either enables it.
    ///
    /// When both name a rest day, `self` wins.
    pub fn merge(self, other: SchedulingRules) -> Self {
        Self {
            avoid_consecutive_same_subject: self.avoid_consecutive_same_subject
                || other.avoid_consecutive_same_subject,
            weekly_rest_day: self.weekly_rest_day.or(other.weekly_rest_day),
        }
    }

    /// Whether `date` falls on the weekly rest day.
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.weekly_rest_day == Some(date.weekday())
    }
}

/// Free-text rules as typed by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleText {
    lowered: String,
}

impl RuleText {
    /// Wraps a rules string.
    pub fn new(text: &str) -> Self {
        Self {
            lowered: text.to_lowercase(),
        }
    }

    /// Whether the text declares Sunday a holiday (weekly rest day).
    pub fn holidays_exclude_weekly_rest_day(&self) -> bool {
        self.lowered.contains(SUNDAY)
    }

    /// Whether the text asks to avoid the same subject in adjacent periods.
    pub fn avoid_repeating_subject_in_adjacent_periods(&self) -> bool {
        self.lowered.contains(AVOID_CONSECUTIVE)
    }

    /// Structured rules recognized in the text.
    pub fn to_rules(&self) -> SchedulingRules {
        SchedulingRules {
            avoid_consecutive_same_subject: self.avoid_repeating_subject_in_adjacent_periods(),
            weekly_rest_day: self
                .holidays_exclude_weekly_rest_day()
                .then_some(Weekday::Sun),
        }
    }
}
