//! Input validation and output auditing.
//!
//! # Catalog checks
//! Detects, before scheduling:
//! - Duplicate ids (subjects, faculty, classrooms, batches)
//! - Subject references that do not resolve (batch subjects, faculty
//!   expertise, common subjects)
//! - A time grid with no days or no teaching periods
//!
//! The schedulers tolerate unknown subject ids by dropping them; these
//! checks let a caller reject such input instead.
//!
//! # Conflict audit
//! Re-checks the exclusivity invariants of a finished timetable:
//! one class per batch per cell, one class per faculty member per cell,
//! one class per classroom per cell, one exam per batch per date.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{Catalog, ExamScheduleEntry, ScheduleEntry, TimeGrid};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of one kind share the same id.
    DuplicateId,
    /// A subject id that is not in the subject catalog.
    UnknownSubject,
    /// The grid has no placeable cell.
    EmptyGrid,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a catalog and grid before scheduling.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog, grid: &TimeGrid) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique(
        "subject",
        catalog.subjects.iter().map(|s| s.id.as_str()),
        &mut errors,
    );
    check_unique(
        "faculty",
        catalog.faculty.iter().map(|f| f.id.as_str()),
        &mut errors,
    );
    check_unique(
        "classroom",
        catalog.classrooms.iter().map(|c| c.id.as_str()),
        &mut errors,
    );
    check_unique(
        "batch",
        catalog.batches.iter().map(|b| b.id.as_str()),
        &mut errors,
    );

    let subject_ids: HashSet<&str> = catalog.subjects.iter().map(|s| s.id.as_str()).collect();
    let mut check_ref = |owner: String, id: &str| {
        if !subject_ids.contains(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSubject,
                format!("{owner} references unknown subject '{id}'"),
            ));
        }
    };

    for batch in &catalog.batches {
        for id in &batch.subject_ids {
            check_ref(format!("Batch '{}'", batch.id), id);
        }
    }
    for faculty in &catalog.faculty {
        for id in &faculty.expertise {
            check_ref(format!("Faculty '{}'", faculty.id), id);
        }
    }
    for id in &catalog.common_subject_ids {
        check_ref("Common subject list".to_string(), id);
    }

    if grid.placeable_cell_count() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyGrid,
            format!(
                "Time grid has no placeable cells ({} days, {} teaching periods)",
                grid.days.len(),
                grid.periods_per_day()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
}

/// Which exclusivity rules apply to a class timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimetableMode {
    /// One batch's private grid: one class per cell.
    SingleGroup,
    /// Shared grid: one class per batch, faculty member and room per cell.
    Combined,
}

/// A broken exclusivity invariant in a finished timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Conflict category.
    pub kind: ConflictKind,
    /// Where it happened ("day / period" or the exam date).
    pub slot: String,
    /// The doubly-booked entity (batch, faculty or classroom id).
    pub entity_id: String,
}

/// Categories of conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Two classes in one cell of a single-group timetable.
    CellDoubleBooked,
    /// A batch has two classes in one cell.
    BatchDoubleBooked,
    /// A faculty member teaches twice in one cell.
    FacultyDoubleBooked,
    /// A classroom hosts two classes in one cell.
    ClassroomDoubleBooked,
    /// A batch sits two exams on one date.
    ExamDateClash,
}

/// Finds exclusivity conflicts in a class timetable.
pub fn find_class_conflicts(entries: &[ScheduleEntry], mode: TimetableMode) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut seen: HashMap<(ConflictKind, &str, &str, &str), usize> = HashMap::new();

    for e in entries {
        let keys: Vec<(ConflictKind, &str)> = match mode {
            TimetableMode::SingleGroup => vec![(ConflictKind::CellDoubleBooked, "")],
            TimetableMode::Combined => vec![
                (
                    ConflictKind::BatchDoubleBooked,
                    e.batch_id.as_deref().unwrap_or(""),
                ),
                (ConflictKind::FacultyDoubleBooked, e.faculty_id.as_str()),
                (ConflictKind::ClassroomDoubleBooked, e.classroom_id.as_str()),
            ],
        };

        for (kind, entity) in keys {
            let count = seen
                .entry((kind, e.day.as_str(), e.period.as_str(), entity))
                .or_insert(0);
            *count += 1;
            if *count == 2 {
                conflicts.push(Conflict {
                    kind,
                    slot: format!("{} / {}", e.day, e.period),
                    entity_id: entity.to_string(),
                });
            }
        }
    }

    conflicts
}

/// Finds batches with more than one exam on a date.
pub fn find_exam_conflicts(entries: &[ExamScheduleEntry]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut seen: HashMap<(&str, NaiveDate), usize> = HashMap::new();

    for e in entries {
        let count = seen.entry((e.batch_id.as_str(), e.date)).or_insert(0);
        *count += 1;
        if *count == 2 {
            conflicts.push(Conflict {
                kind: ConflictKind::ExamDateClash,
                slot: e.date.to_string(),
                entity_id: e.batch_id.clone(),
            });
        }
    }

    conflicts
}
