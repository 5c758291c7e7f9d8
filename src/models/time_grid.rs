//! Weekly time grid models.
//!
//! A time grid is an ordered list of day labels crossed with an ordered
//! list of period slots. Break slots keep their position in the period
//! sequence (they separate adjacent teaching periods) but never receive
//! a class.
//!
//! # Layout generation
//! `TimeGridLayout` produces period labels of the form `"HH:MM-HH:MM"`
//! from a start time and a fixed period length, inserting named break
//! slots after configured period numbers.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// One entry of the period sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSlot {
    /// Display label (e.g., "09:00-09:50" or "Lunch Break").
    pub label: String,
    /// Break slots are layout spacers and are never placeable.
    pub is_break: bool,
}

impl PeriodSlot {
    /// Creates a teaching period.
    pub fn teaching(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_break: false,
        }
    }

    /// Creates a break slot.
    pub fn break_slot(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_break: true,
        }
    }
}

/// Ordered days × ordered periods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Day labels in display order.
    pub days: Vec<String>,
    /// Period slots in display order, breaks included.
    pub periods: Vec<PeriodSlot>,
}

impl TimeGrid {
    /// Creates a grid from explicit day labels and period slots.
    pub fn new<I, S>(days: I, periods: Vec<PeriodSlot>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            periods,
        }
    }

    /// Creates a grid from plain period labels.
    ///
    /// A label is treated as a break when it contains "break"
    /// (case-insensitive), e.g. "Lunch Break".
    pub fn from_labels<D, DS, P, PS>(days: D, periods: P) -> Self
    where
        D: IntoIterator<Item = DS>,
        DS: Into<String>,
        P: IntoIterator<Item = PS>,
        PS: Into<String>,
    {
        let periods = periods
            .into_iter()
            .map(|p| {
                let label: String = p.into();
                if label.to_lowercase().contains("break") {
                    PeriodSlot::break_slot(label)
                } else {
                    PeriodSlot::teaching(label)
                }
            })
            .collect();
        Self::new(days, periods)
    }

    /// Teaching periods in order (breaks skipped).
    pub fn teaching_periods(&self) -> impl Iterator<Item = &PeriodSlot> {
        self.periods.iter().filter(|p| !p.is_break)
    }

    /// Number of teaching periods per day.
    pub fn periods_per_day(&self) -> usize {
        self.teaching_periods().count()
    }

    /// Number of placeable (day, period) cells.
    pub fn placeable_cell_count(&self) -> usize {
        self.days.len() * self.periods_per_day()
    }
}

/// A break inserted into a generated layout.
///
/// Read from configuration files, so field names stay snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakSpec {
    /// 1-based number of the teaching period the break follows.
    pub after_period: u32,
    /// Display name; should contain "break" if the labels are re-parsed.
    pub name: String,
    /// Break length in minutes.
    pub minutes: u32,
}

impl BreakSpec {
    /// Creates a break specification.
    pub fn new(after_period: u32, name: impl Into<String>, minutes: u32) -> Self {
        Self {
            after_period,
            name: name.into(),
            minutes,
        }
    }
}

/// Generator for a regular school day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGridLayout {
    /// Day labels.
    pub days: Vec<String>,
    /// Start of the first period.
    pub start: NaiveTime,
    /// Number of teaching periods per day.
    pub periods_per_day: u32,
    /// Length of one teaching period in minutes.
    pub period_minutes: u32,
    /// Breaks between periods.
    pub breaks: Vec<BreakSpec>,
}

impl Default for TimeGridLayout {
    /// Monday to Friday, eight 50-minute periods from 09:00 with a short
    /// break after periods 2 and 6 and a lunch break after period 4.
    fn default() -> Self {
        Self {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .into_iter()
                .map(String::from)
                .collect(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            periods_per_day: 8,
            period_minutes: 50,
            breaks: vec![
                BreakSpec::new(2, "Short Break", 20),
                BreakSpec::new(4, "Lunch Break", 50),
                BreakSpec::new(6, "Short Break", 20),
            ],
        }
    }
}

impl TimeGridLayout {
    /// Sets the day labels.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the start time of the first period.
    pub fn with_start(mut self, start: NaiveTime) -> Self {
        self.start = start;
        self
    }

    /// Sets period count and length.
    pub fn with_periods(mut self, periods_per_day: u32, period_minutes: u32) -> Self {
        self.periods_per_day = periods_per_day;
        self.period_minutes = period_minutes;
        self
    }

    /// Replaces the break list.
    pub fn with_breaks(mut self, breaks: Vec<BreakSpec>) -> Self {
        self.breaks = breaks;
        self
    }

    /// Generates the time grid.
    ///
    /// Breaks are applied in ascending `after_period` order; when several
    /// breaks name the same period only the first is used. Times wrap at
    /// midnight.
    pub fn build(&self) -> TimeGrid {
        let mut breaks: Vec<&BreakSpec> = self.breaks.iter().collect();
        breaks.sort_by_key(|b| b.after_period);

        let mut periods = Vec::new();
        let mut clock = self.start;
        for n in 1..=self.periods_per_day {
            let end = clock + TimeDelta::minutes(i64::from(self.period_minutes));
            periods.push(PeriodSlot::teaching(format!(
                "{}-{}",
                clock.format("%H:%M"),
                end.format("%H:%M")
            )));
            clock = end;

            if let Some(b) = breaks.iter().find(|b| b.after_period == n) {
                periods.push(PeriodSlot::break_slot(b.name.clone()));
                clock += TimeDelta::minutes(i64::from(b.minutes));
            }
        }

        TimeGrid {
            days: self.days.clone(),
            periods,
        }
    }
}
