//! Workload normalization.
//!
//! Fits a batch's weekly subject load to the grid's capacity so that
//! every placeable cell receives exactly one class.
//!
//! # Algorithm
//! 1. `required` = sum of subject hours; `available` = placeable cells.
//! 2. `required > available` fails with `CapacityExceeded`.
//! 3. `required < available`: sort subjects ascending by hours (stable)
//!    and hand out the deficit one hour at a time, cycling through that
//!    order. Subjects with the lightest load absorb the filler first.
//! 4. `required == available`: unchanged.
//!
//! A batch with no subjects is returned empty; there is nothing to
//! distribute the deficit over.

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::{TimetableError, TimetableResult};
use crate::models::{Batch, Catalog, Subject};

/// Union of common and batch-specific subject ids, first occurrence wins.
///
/// Common subjects come first, then the batch's own subjects.
pub fn effective_subject_ids<'a>(
    batch_subject_ids: &'a [String],
    common_subject_ids: &'a [String],
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    common_subject_ids
        .iter()
        .chain(batch_subject_ids)
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Working copies of the catalog subjects relevant to `batch`.
///
/// Subjects keep catalog order. Ids with no catalog entry are dropped.
pub fn resolve_batch_subjects(batch: &Batch, catalog: &Catalog) -> Vec<Subject> {
    let wanted = effective_subject_ids(&batch.subject_ids, &catalog.common_subject_ids);

    for id in &wanted {
        if catalog.subject(id).is_none() {
            warn!("batch '{}' references unknown subject '{}'; ignoring", batch.id, id);
        }
    }

    catalog
        .subjects
        .iter()
        .filter(|s| wanted.contains(&s.id.as_str()))
        .cloned()
        .collect()
}

/// Adjusts working-copy hours so they sum to `available`.
///
/// `batch_label` is only used in the error message.
pub fn normalize_workload(
    batch_label: &str,
    mut subjects: Vec<Subject>,
    available: usize,
) -> TimetableResult<Vec<Subject>> {
    let required: usize = subjects.iter().map(|s| s.hours_per_week as usize).sum();

    if required > available {
        return Err(TimetableError::capacity_exceeded(batch_label, required, available));
    }

    if required < available && !subjects.is_empty() {
        let deficit = available - required;
        debug!(
            "{batch_label}: distributing {deficit} filler hours over {} subjects",
            subjects.len()
        );

        subjects.sort_by_key(|s| s.hours_per_week);
        let n = subjects.len();
        for i in 0..deficit {
            subjects[i % n].hours_per_week += 1;
        }
    }

    Ok(subjects)
}

/// Normalized workload of one batch.
#[derive(Debug, Clone)]
pub struct WorkloadPlan {
    /// Adjusted working copies.
    pub subjects: Vec<Subject>,
    /// Raw hour sum before adjustment.
    pub required: usize,
    /// Placeable cells the plan was fitted to.
    pub available: usize,
}

impl WorkloadPlan {
    /// Resolves and normalizes the workload of `batch` against `available` cells.
    pub fn for_batch(batch: &Batch, catalog: &Catalog, available: usize) -> TimetableResult<Self> {
        let subjects = resolve_batch_subjects(batch, catalog);
        let required = subjects.iter().map(|s| s.hours_per_week as usize).sum();
        let subjects = normalize_workload(batch.label(), subjects, available)?;
        Ok(Self {
            subjects,
            required,
            available,
        })
    }

    /// Adjusted hour sum.
    pub fn total_hours(&self) -> usize {
        self.subjects.iter().map(|s| s.hours_per_week as usize).sum()
    }
}
