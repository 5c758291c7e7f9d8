//! End-to-end timetabling scenarios.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_timetable::models::{Batch, Catalog, Classroom, Faculty, Subject, TimeGrid};
use u_timetable::scheduler::{CombinedScheduler, ExamRequest, ExamScheduler, SingleGroupScheduler};
use u_timetable::validation::{find_class_conflicts, find_exam_conflicts, TimetableMode};
use u_timetable::TimetableError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two days, three teaching periods around a lunch break: six cells.
fn small_grid() -> TimeGrid {
    TimeGrid::from_labels(["Monday", "Tuesday"], ["P1", "P2", "Lunch Break", "P3"])
}

fn class_catalog() -> Catalog {
    Catalog::new()
        .with_subject(Subject::new("MA101", 4).with_name("Calculus I"))
        .with_subject(Subject::new("CS101", 2).with_name("Programming"))
        .with_faculty(Faculty::new("F1").with_name("Dr. Rao").with_expertise("MA101"))
        .with_faculty(Faculty::new("F2").with_name("Dr. Lee").with_expertise("CS101"))
        .with_classroom(Classroom::new("R1").with_name("Room 101"))
}

#[test]
fn test_exact_fit_fills_grid() {
    let catalog = class_catalog();
    let batch = Batch::new("CSE").with_name("CSE Year 1").with_subjects(["MA101", "CS101"]);
    let grid = small_grid();

    let mut rng = StdRng::seed_from_u64(11);
    let entries = SingleGroupScheduler::new()
        .schedule_with_rng(&batch, &catalog, &grid, &mut rng)
        .unwrap();

    assert_eq!(entries.len(), 6);
    let cells: HashSet<(&str, &str)> = entries
        .iter()
        .map(|e| (e.day.as_str(), e.period.as_str()))
        .collect();
    assert_eq!(cells.len(), 6);
    assert!(entries.iter().all(|e| e.period != "Lunch Break"));
    assert!(entries.iter().all(|e| e.batch_id.is_none()));
    assert_eq!(entries.iter().filter(|e| e.subject_id == "MA101").count(), 4);
    assert!(find_class_conflicts(&entries, TimetableMode::SingleGroup).is_empty());
}

#[test]
fn test_one_hour_over_capacity() {
    let catalog = class_catalog().with_subject(Subject::new("PH101", 1));
    let batch = Batch::new("CSE")
        .with_name("CSE Year 1")
        .with_subjects(["MA101", "CS101", "PH101"]);

    let err = SingleGroupScheduler::new()
        .schedule(&batch, &catalog, &small_grid())
        .unwrap_err();

    assert_eq!(
        err,
        TimetableError::CapacityExceeded {
            batch: "CSE Year 1".to_string(),
            required: 7,
            available: 6,
        }
    );
}

#[test]
fn test_common_subject_non_expert_fallback() {
    let catalog = Catalog::new()
        .with_subject(Subject::new("MA101", 1).with_name("Calculus I"))
        .with_faculty(Faculty::new("F1").with_expertise("MA101"))
        .with_faculty(Faculty::new("F2"))
        .with_classroom(Classroom::new("R1"))
        .with_classroom(Classroom::new("R2"))
        .with_common_subject("MA101");
    let batches = vec![Batch::new("CSE"), Batch::new("ECE")];
    let grid = TimeGrid::from_labels(["Monday"], ["P1"]);

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let entries = CombinedScheduler::new()
            .schedule_with_rng(&batches, &catalog, &grid, &mut rng)
            .unwrap();

        assert_eq!(entries.len(), 2);
        let faculty: HashSet<&str> = entries.iter().map(|e| e.faculty_id.as_str()).collect();
        assert_eq!(faculty, HashSet::from(["F1", "F2"]));
        let batch_ids: HashSet<Option<&str>> =
            entries.iter().map(|e| e.batch_id.as_deref()).collect();
        assert_eq!(batch_ids, HashSet::from([Some("CSE"), Some("ECE")]));
        assert!(find_class_conflicts(&entries, TimetableMode::Combined).is_empty());
    }
}

fn exam_catalog(subjects: usize) -> Catalog {
    (0..subjects)
        .fold(Catalog::new(), |c, i| {
            c.with_subject(Subject::new(format!("S{i}"), 3).with_name(format!("Subject {i}")))
        })
        .with_batch(Batch::new("CSE").with_name("CSE Year 1"))
}

fn week_request(subjects: usize) -> ExamRequest {
    // Monday 2025-03-03 through Sunday 2025-03-09.
    ExamRequest::new(date(2025, 3, 3), date(2025, 3, 9))
        .with_selection("CSE", (0..subjects).map(|i| format!("S{i}")))
}

#[test]
fn test_week_with_rest_day() {
    let scheduler = ExamScheduler::new().with_rule_text("Sunday is a holiday");
    assert_eq!(
        scheduler.session_slots(date(2025, 3, 3), date(2025, 3, 9)).len(),
        12
    );

    let mut rng = StdRng::seed_from_u64(3);
    let entries = scheduler
        .schedule_with_rng(&week_request(6), &exam_catalog(6), &mut rng)
        .unwrap();
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().all(|e| e.date.weekday() != Weekday::Sun));
    assert!(find_exam_conflicts(&entries).is_empty());

    let err = scheduler
        .schedule_with_rng(&week_request(7), &exam_catalog(7), &mut rng)
        .unwrap_err();
    assert!(matches!(err, TimetableError::PlacementExhausted { .. }));
}

#[test]
fn test_range_too_short_names_pair() {
    let request = ExamRequest::new(date(2025, 3, 3), date(2025, 3, 4))
        .with_selection("CSE", ["S0", "S1", "S2"]);

    let err = ExamScheduler::new()
        .schedule(&request, &exam_catalog(3))
        .unwrap_err();

    match err {
        TimetableError::PlacementExhausted { subject, batch, .. } => {
            assert_eq!(batch, "CSE Year 1");
            assert!(["Subject 0", "Subject 1", "Subject 2"].contains(&subject.as_str()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_zero_subjects_is_empty_success() {
    let catalog = class_catalog();
    let batch = Batch::new("EMPTY");

    let single = SingleGroupScheduler::new()
        .schedule(&batch, &catalog, &small_grid())
        .unwrap();
    assert!(single.is_empty());

    let combined = CombinedScheduler::new()
        .schedule(&[batch], &catalog, &small_grid())
        .unwrap();
    assert!(combined.is_empty());
}
