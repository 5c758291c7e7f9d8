//! Property tests for normalization and placement invariants.

use std::collections::HashSet;

use chrono::{NaiveDate, TimeDelta};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_timetable::models::{Batch, Catalog, Classroom, Faculty, Subject, TimeGrid};
use u_timetable::scheduler::{CombinedScheduler, ExamRequest, ExamScheduler, SingleGroupScheduler};
use u_timetable::validation::{find_class_conflicts, find_exam_conflicts, TimetableMode};
use u_timetable::workload::normalize_workload;
use u_timetable::TimetableError;

fn subjects(hours: &[u32]) -> Vec<Subject> {
    hours
        .iter()
        .enumerate()
        .map(|(i, &h)| Subject::new(format!("S{i}"), h))
        .collect()
}

fn grid(days: usize, periods: usize) -> TimeGrid {
    TimeGrid::from_labels(
        (0..days).map(|d| format!("D{d}")),
        (0..periods).map(|p| format!("P{p}")),
    )
}

/// Catalog with `staff` generalist faculty and rooms.
fn catalog(hours: &[u32], staff: usize) -> Catalog {
    let mut catalog = subjects(hours)
        .into_iter()
        .fold(Catalog::new(), |c, s| c.with_subject(s));
    for i in 0..staff {
        catalog = catalog
            .with_faculty(Faculty::new(format!("F{i}")))
            .with_classroom(Classroom::new(format!("R{i}")));
    }
    catalog
}

fn all_subjects(batch_id: &str, count: usize) -> Batch {
    Batch::new(batch_id).with_subjects((0..count).map(|i| format!("S{i}")))
}

proptest! {
    #[test]
    fn prop_normalized_hours_fill_capacity(
        hours in prop::collection::vec(0u32..8, 1..6),
        available in 0usize..40,
    ) {
        let required: usize = hours.iter().map(|&h| h as usize).sum();
        let result = normalize_workload("B", subjects(&hours), available);

        if required <= available {
            let adjusted = result.unwrap();
            let total: usize = adjusted.iter().map(|s| s.hours_per_week as usize).sum();
            prop_assert_eq!(total, available);
            for s in &adjusted {
                let idx: usize = s.id[1..].parse().unwrap();
                prop_assert!(s.hours_per_week >= hours[idx]);
            }
        } else {
            let is_capacity = matches!(
                result,
                Err(TimetableError::CapacityExceeded { required: r, available: a, .. })
                    if r == required && a == available
            );
            prop_assert!(is_capacity);
        }
    }

    #[test]
    fn prop_single_group_one_class_per_cell(
        hours in prop::collection::vec(0u32..4, 1..5),
        days in 1usize..4,
        periods in 1usize..5,
        seed in any::<u64>(),
    ) {
        let required: usize = hours.iter().map(|&h| h as usize).sum();
        let cells = days * periods;
        prop_assume!(required <= cells);

        let catalog = catalog(&hours, 1);
        let batch = all_subjects("B", hours.len());
        let grid = grid(days, periods);
        let mut rng = StdRng::seed_from_u64(seed);
        let entries = SingleGroupScheduler::new()
            .schedule_with_rng(&batch, &catalog, &grid, &mut rng)
            .unwrap();

        prop_assert_eq!(entries.len(), cells);
        prop_assert!(find_class_conflicts(&entries, TimetableMode::SingleGroup).is_empty());
    }

    #[test]
    fn prop_combined_no_resource_collisions(
        batch_count in 1usize..4,
        extra_staff in 0usize..2,
        days in 1usize..3,
        periods in 2usize..4,
        seed in any::<u64>(),
    ) {
        let hours = [1, 1];
        let catalog = catalog(&hours, batch_count + extra_staff);
        let batches: Vec<Batch> = (0..batch_count)
            .map(|b| all_subjects(&format!("B{b}"), hours.len()))
            .collect();
        let grid = grid(days, periods);

        let mut rng = StdRng::seed_from_u64(seed);
        let entries = CombinedScheduler::new()
            .schedule_with_rng(&batches, &catalog, &grid, &mut rng)
            .unwrap();

        prop_assert_eq!(entries.len(), batch_count * days * periods);
        prop_assert!(find_class_conflicts(&entries, TimetableMode::Combined).is_empty());
    }

    #[test]
    fn prop_exam_one_per_batch_per_date(
        exams_per_batch in 0usize..5,
        batch_count in 1usize..4,
        range_days in 0i64..8,
        seed in any::<u64>(),
    ) {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let end = start + TimeDelta::days(range_days);
        let hours = vec![3; exams_per_batch];

        let mut catalog = catalog(&hours, 0);
        let mut request = ExamRequest::new(start, end);
        for b in 0..batch_count {
            let id = format!("B{b}");
            catalog = catalog.with_batch(Batch::new(id.clone()));
            request = request.with_selection(id, (0..exams_per_batch).map(|i| format!("S{i}")));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let result = ExamScheduler::new().schedule_with_rng(&request, &catalog, &mut rng);

        let dates = range_days as usize + 1;
        if exams_per_batch <= dates {
            let entries = result.unwrap();
            prop_assert_eq!(entries.len(), exams_per_batch * batch_count);
            prop_assert!(find_exam_conflicts(&entries).is_empty());
            prop_assert!(entries.iter().all(|e| e.date >= start && e.date <= end));
        } else {
            let is_exhausted = matches!(result, Err(TimetableError::PlacementExhausted { .. }));
            prop_assert!(is_exhausted);
        }
    }

    #[test]
    fn prop_same_seed_same_timetable(seed in any::<u64>()) {
        let hours = [3, 2, 1];
        let catalog = catalog(&hours, 3);
        let batches = vec![all_subjects("B0", 3), all_subjects("B1", 2)];
        let grid = grid(2, 4);
        let scheduler = CombinedScheduler::new();

        let first = scheduler
            .schedule_with_rng(&batches, &catalog, &grid, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let second = scheduler
            .schedule_with_rng(&batches, &catalog, &grid, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        prop_assert_eq!(first, second);

        let single = SingleGroupScheduler::new();
        let a = single
            .schedule_with_rng(&batches[0], &catalog, &grid, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let b = single
            .schedule_with_rng(&batches[0], &catalog, &grid, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let cells: HashSet<(String, String)> =
            a.iter().map(|e| (e.day.clone(), e.period.clone())).collect();
        prop_assert_eq!(cells.len(), 8);
        prop_assert_eq!(a, b);
    }
}
