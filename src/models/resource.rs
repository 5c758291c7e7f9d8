//! Teaching resource models.
//!
//! Faculty members and classrooms are the two exclusive resources of a
//! timetable cell. Faculty carry a set of subject ids they are expert in;
//! classrooms are interchangeable (no capacity or room-type matching).

use serde::{Deserialize, Serialize};

/// A faculty member who can teach classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Subject ids this faculty member is qualified to teach.
    pub expertise: Vec<String>,
}

/// A classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Faculty {
    /// Creates a faculty member with no expertise.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            expertise: Vec::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a subject to the expertise set.
    pub fn with_expertise(mut self, subject_id: impl Into<String>) -> Self {
        let subject_id = subject_id.into();
        if !self.expertise.contains(&subject_id) {
            self.expertise.push(subject_id);
        }
        self
    }

    /// Whether this faculty member is an expert in the given subject.
    pub fn is_expert_in(&self, subject_id: &str) -> bool {
        self.expertise.iter().any(|s| s == subject_id)
    }
}

impl Classroom {
    /// Creates a classroom.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
