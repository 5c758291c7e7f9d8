//! Batch (student group) model.

use serde::{Deserialize, Serialize};

/// A student group with its own subject requirements.
///
/// The subjects listed here are layered with the common-subject set of a
/// scheduling run to form the batch's effective subject set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Unique batch identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Batch-specific subject ids.
    pub subject_ids: Vec<String>,
}

impl Batch {
    /// Creates a batch with no subjects.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subject_ids: Vec::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a batch-specific subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_ids.push(subject_id.into());
        self
    }

    /// Adds several batch-specific subjects.
    pub fn with_subjects<I, S>(mut self, subject_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subject_ids
            .extend(subject_ids.into_iter().map(Into::into));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_builder() {
        let b = Batch::new("B_CSE_Y1")
            .with_name("CSE Year 1")
            .with_subject("CS101")
            .with_subjects(["CS201", "CS202"]);

        assert_eq!(b.id, "B_CSE_Y1");
        assert_eq!(b.label(), "CSE Year 1");
        assert_eq!(b.subject_ids, vec!["CS101", "CS201", "CS202"]);
    }

    #[test]
    fn test_batch_label_fallback() {
        assert_eq!(Batch::new("B1").label(), "B1");
    }
}
