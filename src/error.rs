//! Fatal scheduling errors.
//!
//! A scheduling call either returns a complete timetable or fails with one
//! of these errors. There is no partial result and no internal retry.

/// Result type for scheduling operations.
pub type TimetableResult<T> = Result<T, TimetableError>;

/// Why a scheduling call was aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// A batch needs more class hours than the grid has placeable cells.
    ///
    /// Detected during workload normalization, before any placement.
    #[error(
        "The total required class hours ({required}) for {batch} exceed the available slots ({available}). \
         Reduce the number of subjects or hours per week."
    )]
    CapacityExceeded {
        /// Batch display name.
        batch: String,
        /// Sum of the batch's subject hours.
        required: usize,
        /// Placeable cells in the grid.
        available: usize,
    },

    /// A class or exam instance has no admissible slot/resource combination.
    #[error("Could not place {subject} for batch {batch}. {hint}")]
    PlacementExhausted {
        /// Subject display name (or id when unknown).
        subject: String,
        /// Batch display name.
        batch: String,
        /// Suggested remedy.
        hint: &'static str,
    },
}

impl TimetableError {
    pub(crate) fn capacity_exceeded(batch: &str, required: usize, available: usize) -> Self {
        Self::CapacityExceeded {
            batch: batch.to_string(),
            required,
            available,
        }
    }

    pub(crate) fn placement_exhausted(subject: &str, batch: &str, hint: &'static str) -> Self {
        Self::PlacementExhausted {
            subject: subject.to_string(),
            batch: batch.to_string(),
            hint,
        }
    }
}
