//! Single-batch weekly timetable.
//!
//! # Algorithm
//!
//! 1. Resolve the batch's subjects (batch-specific ∪ common) and normalize
//!    their hours to the grid's placeable-cell count.
//! 2. Expand into one class instance per hour and shuffle.
//! 3. For each instance, scan a shuffled period order, and within each
//!    period a shuffled day order, for a free cell. With the adjacency
//!    rule on, skip cells whose previous period (same day) holds the same
//!    subject.
//! 4. Staff the cell with a random expert for the subject, or a random
//!    faculty member if nobody is an expert, and a random classroom.
//! 5. An instance with no admissible cell aborts the call.
//!
//! The batch owns its grid, so faculty and classrooms are not checked
//! against other batches' timetables.

use log::{debug, info, warn};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::{class_entry, expand_class_hours};
use crate::error::{TimetableError, TimetableResult};
use crate::grid::{CellRef, SlotGrid};
use crate::models::{Batch, Catalog, Faculty, ScheduleEntry, Subject, TimeGrid};
use crate::rules::SchedulingRules;
use crate::workload::WorkloadPlan;

const HINT: &str = "Check that faculty and classrooms are defined and that the \
                    adjacency rule leaves room for every class.";

/// Weekly timetable generator for one batch.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_timetable::models::{Batch, Catalog, Classroom, Faculty, Subject, TimeGrid};
/// use u_timetable::scheduler::SingleGroupScheduler;
///
/// let catalog = Catalog::new()
///     .with_subject(Subject::new("CS101", 2).with_name("Programming"))
///     .with_faculty(Faculty::new("F1").with_expertise("CS101"))
///     .with_classroom(Classroom::new("C101"));
/// let batch = Batch::new("B1").with_subject("CS101");
/// let grid = TimeGrid::from_labels(["Mon", "Tue"], ["P1", "P2"]);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let entries = SingleGroupScheduler::new()
///     .schedule_with_rng(&batch, &catalog, &grid, &mut rng)
///     .unwrap();
/// assert_eq!(entries.len(), 4); // hours are stretched to fill the grid
/// ```
#[derive(Debug, Clone, Default)]
pub struct SingleGroupScheduler {
    rules: SchedulingRules,
}

impl SingleGroupScheduler {
    /// Creates a scheduler with no rules enabled.
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

    /// Active rules.
    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    /// Generates a timetable using the thread-local random source.
    pub fn schedule(
        &self,
        batch: &Batch,
        catalog: &Catalog,
        grid: &TimeGrid,
    ) -> TimetableResult<Vec<ScheduleEntry>> {
        self.schedule_with_rng(batch, catalog, grid, &mut rand::rng())
    }

    /// Generates a timetable drawing all randomness from `rng`.
    pub fn schedule_with_rng<R: Rng + ?Sized>(
        &self,
        batch: &Batch,
        catalog: &Catalog,
        grid: &TimeGrid,
        rng: &mut R,
    ) -> TimetableResult<Vec<ScheduleEntry>> {
        // Occupant = index into the plan's subject list.
        let mut slots: SlotGrid<'_, usize> = SlotGrid::new(grid);
        let plan = WorkloadPlan::for_batch(batch, catalog, slots.placeable_cell_count())?;

        let mut instances = expand_class_hours(&plan.subjects);
        instances.shuffle(rng);
        debug!(
            "{}: placing {} classes into {} cells",
            batch.id,
            instances.len(),
            slots.placeable_cell_count()
        );

        let experts_by_subject = experts_per_subject(&batch.id, &plan.subjects, catalog);

        let mut schedule = Vec::with_capacity(instances.len());
        for subject_idx in instances {
            let subject = &plan.subjects[subject_idx];
            let experts = &experts_by_subject[subject_idx];

            let mut periods = slots.placeable_periods().to_vec();
            periods.shuffle(rng);
            let mut days: Vec<usize> = (0..slots.day_count()).collect();
            days.shuffle(rng);

            let exhausted =
                || TimetableError::placement_exhausted(subject.label(), batch.label(), HINT);
            let cell = self
                .first_open_cell(&slots, subject_idx, &periods, &days)
                .ok_or_else(exhausted)?;

            let faculty = if experts.is_empty() {
                catalog.faculty.choose(rng)
            } else {
                experts.choose(rng).copied()
            };
            let classroom = catalog.classrooms.choose(rng);
            let (Some(faculty), Some(classroom)) = (faculty, classroom) else {
                return Err(exhausted());
            };

            schedule.push(class_entry(&slots, cell, subject, faculty, classroom, None));
            slots.occupy(cell, subject_idx);
        }

        info!("{}: scheduled {} classes", batch.id, schedule.len());
        Ok(schedule)
    }

    /// First free cell in search order (periods outer, days inner) that the
    /// adjacency rule admits for `subject_idx`.
    fn first_open_cell(
        &self,
        slots: &SlotGrid<'_, usize>,
        subject_idx: usize,
        periods: &[usize],
        days: &[usize],
    ) -> Option<CellRef> {
        periods
            .iter()
            .flat_map(|&period| days.iter().map(move |&day| CellRef::new(day, period)))
            .find(|&cell| {
                !slots.is_occupied(cell)
                    && !(self.rules.avoid_consecutive_same_subject
                        && repeats_previous(slots, cell, subject_idx))
            })
    }
}

/// Expert faculty for each subject, in `subjects` order. Warns once for
/// every subject without an expert.
fn experts_per_subject<'c>(
    batch_id: &str,
    subjects: &[Subject],
    catalog: &'c Catalog,
) -> Vec<Vec<&'c Faculty>> {
    subjects
        .iter()
        .map(|subject| {
            let experts: Vec<&Faculty> = catalog
                .faculty
                .iter()
                .filter(|f| f.is_expert_in(&subject.id))
                .collect();
            if experts.is_empty() {
                warn!("{batch_id}: no expert for {}, using any faculty", subject.id);
            }
            experts
        })
        .collect()
}

fn repeats_previous(slots: &SlotGrid<'_, usize>, cell: CellRef, subject_idx: usize) -> bool {
    slots
        .previous_period(cell.period)
        .and_then(|prev| slots.occupant(CellRef::new(cell.day, prev)))
        == Some(&subject_idx)
}
