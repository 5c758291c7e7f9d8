//! Multi-batch combined timetable.
//!
//! All batches share one grid and one faculty/classroom pool. A cell may
//! hold several classes at once as long as no faculty member, classroom
//! or batch appears twice in it.
//!
//! # Algorithm
//!
//! 1. Normalize every batch's workload against the grid (any overflow
//!    aborts before placement) and pool one instance per (batch, hour).
//! 2. Shuffle the pool.
//! 3. For each instance, scan a shuffled day order, and within each day a
//!    shuffled period order. Skip cells where the batch already has a
//!    class, or (adjacency rule) where the batch had the same subject in
//!    the previous period.
//! 4. Faculty: a random free expert, else a random free non-expert.
//!    Classroom: a random free room. Both must exist to commit.
//! 5. An instance with no admissible cell aborts the call.

use log::{debug, info, warn};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::{class_entry, expand_class_hours};
use crate::error::{TimetableError, TimetableResult};
use crate::grid::{CellRef, SlotGrid};
use crate::models::{Batch, Catalog, ScheduleEntry, TimeGrid};
use crate::rules::SchedulingRules;
use crate::workload::WorkloadPlan;

const HINT: &str = "There are likely not enough unique faculty or classrooms to handle all \
                    batches simultaneously. Try reducing the number of batches or adding more resources.";

/// A class committed to a shared cell. All fields are indices.
#[derive(Debug, Clone, Copy)]
struct Occupant {
    batch: usize,
    /// Index into that batch's plan subjects.
    subject: usize,
    faculty: usize,
    classroom: usize,
}

#[derive(Debug, Clone, Copy)]
struct ClassInstance {
    batch: usize,
    subject: usize,
}

/// Combined timetable generator for several batches.
#[derive(Debug, Clone, Default)]
pub struct CombinedScheduler {
    rules: SchedulingRules,
}

impl CombinedScheduler {
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

    /// Generates a combined timetable using the thread-local random source.
    pub fn schedule(
        &self,
        batches: &[Batch],
        catalog: &Catalog,
        grid: &TimeGrid,
    ) -> TimetableResult<Vec<ScheduleEntry>> {
        self.schedule_with_rng(batches, catalog, grid, &mut rand::rng())
    }

    /// Generates a combined timetable drawing all randomness from `rng`.
    ///
    /// Every entry carries its batch id and name.
    pub fn schedule_with_rng<R: Rng + ?Sized>(
        &self,
        batches: &[Batch],
        catalog: &Catalog,
        grid: &TimeGrid,
        rng: &mut R,
    ) -> TimetableResult<Vec<ScheduleEntry>> {
        let mut slots: SlotGrid<'_, Occupant> = SlotGrid::new(grid);
        let available = slots.placeable_cell_count();

        let plans = batches
            .iter()
            .map(|b| WorkloadPlan::for_batch(b, catalog, available))
            .collect::<TimetableResult<Vec<_>>>()?;

        let mut instances: Vec<ClassInstance> = plans
            .iter()
            .enumerate()
            .flat_map(|(batch, plan)| {
                expand_class_hours(&plan.subjects)
                    .into_iter()
                    .map(move |subject| ClassInstance { batch, subject })
            })
            .collect();
        instances.shuffle(rng);
        debug!(
            "placing {} classes for {} batches into {} shared cells",
            instances.len(),
            batches.len(),
            available
        );

        let mut schedule = Vec::with_capacity(instances.len());
        for inst in instances {
            let batch = &batches[inst.batch];
            let subject = &plans[inst.batch].subjects[inst.subject];

            let mut days: Vec<usize> = (0..slots.day_count()).collect();
            days.shuffle(rng);
            let mut periods = slots.placeable_periods().to_vec();
            periods.shuffle(rng);

            let placed = 'search: {
                for &day in &days {
                    for &period in &periods {
                        let cell = CellRef::new(day, period);
                        let occupants = slots.occupants(cell);

                        if occupants.iter().any(|o| o.batch == inst.batch) {
                            continue;
                        }
                        if self.rules.avoid_consecutive_same_subject
                            && repeats_previous(&slots, cell, inst)
                        {
                            continue;
                        }

                        let free_faculty = |expert: bool| -> Vec<usize> {
                            catalog
                                .faculty
                                .iter()
                                .enumerate()
                                .filter(|(i, f)| {
                                    f.is_expert_in(&subject.id) == expert
                                        && !occupants.iter().any(|o| o.faculty == *i)
                                })
                                .map(|(i, _)| i)
                                .collect()
                        };
                        let experts = free_faculty(true);
                        let others = free_faculty(false);
                        let faculty = match experts.choose(rng) {
                            Some(&f) => f,
                            None => match others.choose(rng) {
                                Some(&f) => f,
                                None => continue,
                            },
                        };

                        let rooms: Vec<usize> = (0..catalog.classrooms.len())
                            .filter(|i| !occupants.iter().any(|o| o.classroom == *i))
                            .collect();
                        let Some(&classroom) = rooms.choose(rng) else {
                            continue;
                        };

                        if experts.is_empty() {
                            warn!(
                                "{}: {} taught by non-expert {}",
                                batch.id, subject.id, catalog.faculty[faculty].id
                            );
                        }
                        schedule.push(class_entry(
                            &slots,
                            cell,
                            subject,
                            &catalog.faculty[faculty],
                            &catalog.classrooms[classroom],
                            Some(batch),
                        ));
                        slots.push(
                            cell,
                            Occupant {
                                batch: inst.batch,
                                subject: inst.subject,
                                faculty,
                                classroom,
                            },
                        );
                        break 'search true;
                    }
                }
                false
            };

            if !placed {
                return Err(TimetableError::placement_exhausted(
                    subject.label(),
                    batch.label(),
                    HINT,
                ));
            }
        }

        info!(
            "scheduled {} classes across {} batches",
            schedule.len(),
            batches.len()
        );
        Ok(schedule)
    }
}

fn repeats_previous(slots: &SlotGrid<'_, Occupant>, cell: CellRef, inst: ClassInstance) -> bool {
    slots.previous_period(cell.period).is_some_and(|prev| {
        slots
            .occupants(CellRef::new(cell.day, prev))
            .iter()
            .any(|o| o.batch == inst.batch && o.subject == inst.subject)
    })
}
