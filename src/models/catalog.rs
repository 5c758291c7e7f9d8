//! Resource catalog.
//!
//! The catalog is the read-only snapshot of subjects, faculty, classrooms
//! and batches that an external collaborator hands to the schedulers.
//! Schedulers borrow it for the duration of a call and never mutate it.

use serde::{Deserialize, Serialize};

use super::{Batch, Classroom, Faculty, Subject};

/// All entities available to a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    /// Subject catalog (canonical hour values).
    pub subjects: Vec<Subject>,
    /// Faculty catalog.
    pub faculty: Vec<Faculty>,
    /// Classroom catalog.
    pub classrooms: Vec<Classroom>,
    /// Student groups.
    pub batches: Vec<Batch>,
    /// Subjects required by every batch in a run.
    pub common_subject_ids: Vec<String>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: Faculty) -> Self {
        self.faculty.push(faculty);
        self
    }

    /// Adds a classroom.
    pub fn with_classroom(mut self, classroom: Classroom) -> Self {
        self.classrooms.push(classroom);
        self
    }

    /// Adds a batch.
    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.batches.push(batch);
        self
    }

    /// Marks a subject as common to all batches.
    pub fn with_common_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.common_subject_ids.push(subject_id.into());
        self
    }

    /// Finds a subject by id.
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Finds a faculty member by id.
    pub fn faculty_member(&self, id: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.id == id)
    }

    /// Finds a batch by id.
    pub fn batch(&self, id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }
}
