//! Subject model.
//!
//! A subject is a unit of instruction with a weekly load. The catalog
//! value of `hours_per_week` is never modified by the schedulers; workload
//! normalization operates on cloned working copies.

use serde::{Deserialize, Serialize};

/// A subject taught to one or more batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject identifier (e.g., "CS101").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Required class hours per week (one placeable cell per hour).
    pub hours_per_week: u32,
}

impl Subject {
    /// Creates a subject with the given weekly load.
    pub fn new(id: impl Into<String>, hours_per_week: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            hours_per_week,
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name for display, falling back to the id when no name is set.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
