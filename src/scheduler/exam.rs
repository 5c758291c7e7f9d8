//! Exam session timetable.
//!
//! # Algorithm
//!
//! 1. Enumerate dates in `[start_date, end_date]`, skipping the weekly
//!    rest day, and emit a Forenoon and an Afternoon slot per date.
//! 2. Each batch sits one exam per subject in (selected ∪ common).
//! 3. Shuffle the exam list, then give each exam the first slot (in
//!    date/session order) on a date its batch has no other exam.
//! 4. An exam with no such slot aborts the call.
//!
//! Slots have no capacity: several batches may sit exams in the same
//! session.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{TimetableError, TimetableResult};
use crate::models::{Catalog, ExamScheduleEntry, ExamSession};
use crate::rules::SchedulingRules;
use crate::workload::effective_subject_ids;

const HINT: &str = "Try extending the date range or relaxing rules.";

/// What to examine and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRequest {
    /// First exam date (inclusive).
    pub start_date: NaiveDate,
    /// Last exam date (inclusive).
    pub end_date: NaiveDate,
    /// Batch id → subject ids selected for that batch.
    #[serde(default)]
    pub selections: HashMap<String, Vec<String>>,
    /// Subjects examined for every batch.
    #[serde(default)]
    pub common_subject_ids: Vec<String>,
}

impl ExamRequest {
    /// Creates a request over a date range with no subjects selected.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            selections: HashMap::new(),
            common_subject_ids: Vec::new(),
        }
    }

    /// Selects subjects for a batch.
    pub fn with_selection<I, S>(mut self, batch_id: impl Into<String>, subject_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections
            .entry(batch_id.into())
            .or_default()
            .extend(subject_ids.into_iter().map(Into::into));
        self
    }

    /// Adds a subject examined for all batches.
    pub fn with_common_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.common_subject_ids.push(subject_id.into());
        self
    }
}

/// Exam timetable generator.
///
/// Defaults: sessions start at 09:30 and 14:00, exams last 3 hours.
#[derive(Debug, Clone)]
pub struct ExamScheduler {
    rules: SchedulingRules,
    forenoon_start: NaiveTime,
    afternoon_start: NaiveTime,
    duration_hours: u32,
}

impl Default for ExamScheduler {
    fn default() -> Self {
        Self {
            rules: SchedulingRules::default(),
            forenoon_start: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            afternoon_start: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default(),
            duration_hours: 3,
        }
    }
}

impl ExamScheduler {
    /// Creates a scheduler with default session times.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule set.
    pub fn with_rules(mut self, rules: SchedulingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Adds rules recognized in free text to the current rule set.
    pub fn with_rule_text(mut self, text: &str) -> Self {
        self.rules = self.rules.merge(SchedulingRules::from_text(text));
        self
    }

    /// Sets the session start times.
    pub fn with_session_times(mut self, forenoon: NaiveTime, afternoon: NaiveTime) -> Self {
        self.forenoon_start = forenoon;
        self.afternoon_start = afternoon;
        self
    }

    /// Sets the exam duration in hours.
    pub fn with_duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = hours;
        self
    }

    /// Active rules.
    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    /// Start time of a session.
    pub fn session_start(&self, session: ExamSession) -> NaiveTime {
        match session {
            ExamSession::Forenoon => self.forenoon_start,
            ExamSession::Afternoon => self.afternoon_start,
        }
    }

    /// End time of a session: start plus duration on a 24-hour clock.
    pub fn session_end(&self, session: ExamSession) -> NaiveTime {
        self.session_start(session) + TimeDelta::hours(i64::from(self.duration_hours))
    }

    /// Usable (date, session) slots in date-ascending, session-stable order.
    pub fn session_slots(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, ExamSession)> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| !self.rules.is_rest_day(*d))
            .flat_map(|d| ExamSession::ALL.into_iter().map(move |s| (d, s)))
            .collect()
    }

    /// Generates an exam timetable using the thread-local random source.
    pub fn schedule(
        &self,
        request: &ExamRequest,
        catalog: &Catalog,
    ) -> TimetableResult<Vec<ExamScheduleEntry>> {
        self.schedule_with_rng(request, catalog, &mut rand::rng())
    }

    /// Generates an exam timetable drawing all randomness from `rng`.
    ///
    /// Batches come from `catalog.batches`; a batch without a selection
    /// sits only the common exams. Subject names are resolved through the
    /// catalog, and an unknown subject id cannot be placed.
    pub fn schedule_with_rng<R: Rng + ?Sized>(
        &self,
        request: &ExamRequest,
        catalog: &Catalog,
        rng: &mut R,
    ) -> TimetableResult<Vec<ExamScheduleEntry>> {
        let slots = self.session_slots(request.start_date, request.end_date);

        let no_selection = Vec::new();
        let mut exams: Vec<(usize, &str)> = catalog
            .batches
            .iter()
            .enumerate()
            .flat_map(|(idx, batch)| {
                let selected = request.selections.get(&batch.id).unwrap_or(&no_selection);
                effective_subject_ids(selected, &request.common_subject_ids)
                    .into_iter()
                    .map(move |subject_id| (idx, subject_id))
            })
            .collect();
        exams.shuffle(rng);
        debug!("placing {} exams into {} session slots", exams.len(), slots.len());

        let mut used_dates: Vec<HashSet<NaiveDate>> = vec![HashSet::new(); catalog.batches.len()];
        let mut schedule = Vec::with_capacity(exams.len());

        for (batch_idx, subject_id) in exams {
            let batch = &catalog.batches[batch_idx];
            let Some(subject) = catalog.subject(subject_id) else {
                return Err(TimetableError::placement_exhausted(subject_id, batch.label(), HINT));
            };

            let used = &mut used_dates[batch_idx];
            let Some(&(date, session)) = slots.iter().find(|(d, _)| !used.contains(d)) else {
                return Err(TimetableError::placement_exhausted(
                    subject.label(),
                    batch.label(),
                    HINT,
                ));
            };

            used.insert(date);
            schedule.push(ExamScheduleEntry {
                date,
                session,
                start_time: self.session_start(session),
                end_time: self.session_end(session),
                subject_id: subject.id.clone(),
                subject_name: subject.name.clone(),
                batch_id: batch.id.clone(),
            });
        }

        info!("scheduled {} exams", schedule.len());
        Ok(schedule)
    }
}
