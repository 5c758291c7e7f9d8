//! Randomized greedy timetable schedulers.
//!
//! Three placement algorithms share the same shape: expand the workload
//! into unit instances, shuffle them, then place each instance into the
//! first admissible cell of a freshly shuffled search order. The first
//! instance that cannot be placed aborts the whole call; earlier
//! placements are never revisited.
//!
//! | Scheduler | Unit | Cell capacity |
//! |-----------|------|---------------|
//! | `SingleGroupScheduler` | one weekly hour of a subject | one class |
//! | `CombinedScheduler` | one weekly hour of a (batch, subject) | one class per batch, faculty and room distinct |
//! | `ExamScheduler` | one (batch, subject) exam | unbounded, one exam per batch per date |
//!
//! # Randomness
//! Every scheduler takes its random source as a parameter
//! (`schedule_with_rng`). Seeding the source makes a run reproducible;
//! `schedule` draws from the thread-local generator.
//!
//! # KPI
//! `TimetableKpi` summarizes a generated class timetable.

mod combined;
mod exam;
mod kpi;
mod single;

pub use combined::CombinedScheduler;
pub use exam::{ExamRequest, ExamScheduler};
pub use kpi::TimetableKpi;
pub use single::SingleGroupScheduler;

use crate::grid::{CellRef, SlotGrid};
use crate::models::{Batch, Classroom, Faculty, ScheduleEntry, Subject};

/// One class hour per weekly hour of each subject, as indices into `subjects`.
fn expand_class_hours(subjects: &[Subject]) -> Vec<usize> {
    subjects
        .iter()
        .enumerate()
        .flat_map(|(idx, s)| std::iter::repeat(idx).take(s.hours_per_week as usize))
        .collect()
}

fn class_entry<T>(
    slots: &SlotGrid<'_, T>,
    cell: CellRef,
    subject: &Subject,
    faculty: &Faculty,
    classroom: &Classroom,
    batch: Option<&Batch>,
) -> ScheduleEntry {
    ScheduleEntry {
        day: slots.day_label(cell.day).to_string(),
        period: slots.period_label(cell.period).to_string(),
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        faculty_id: faculty.id.clone(),
        faculty_name: faculty.name.clone(),
        classroom_id: classroom.id.clone(),
        classroom_name: classroom.name.clone(),
        batch_id: batch.map(|b| b.id.clone()),
        batch_name: batch.map(|b| b.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_class_hours() {
        let subjects = vec![Subject::new("A", 2), Subject::new("B", 0), Subject::new("C", 1)];
        assert_eq!(expand_class_hours(&subjects), vec![0, 0, 2]);
    }
}
