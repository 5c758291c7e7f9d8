//! Timetable quality metrics (KPIs).
//!
//! Summarizes a generated class timetable against its grid and catalog.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill rate | entries / (placeable cells × batches) |
//! | Expert coverage | fraction of entries taught by a subject expert |
//! | Faculty load | classes per faculty member per week |
//! | Classroom usage | classes per room per week |
//! | Max faculty load | heaviest weekly load of any faculty member |

use std::collections::{HashMap, HashSet};

use crate::models::{Catalog, ScheduleEntry, TimeGrid};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Number of scheduled classes.
    pub entry_count: usize,
    /// Distinct batches in the timetable (entries without a batch count as one).
    pub batch_count: usize,
    /// Fraction of batch-cells that hold a class (0.0..1.0).
    pub fill_rate: f64,
    /// Fraction of classes taught by an expert (0.0..1.0).
    pub expert_coverage: f64,
    /// Classes per faculty id.
    pub faculty_load: HashMap<String, usize>,
    /// Classes per classroom id.
    pub classroom_usage: HashMap<String, usize>,
    /// Largest value in `faculty_load` (0 if empty).
    pub max_faculty_load: usize,
}

impl TimetableKpi {
    /// Computes KPIs for a class timetable.
    ///
    /// # Arguments
    /// * `entries` - Output of a class scheduler.
    /// * `grid` - The grid the timetable was generated for.
    /// * `catalog` - Catalog used for expertise lookups.
    pub fn calculate(entries: &[ScheduleEntry], grid: &TimeGrid, catalog: &Catalog) -> Self {
        let mut faculty_load: HashMap<String, usize> = HashMap::new();
        let mut classroom_usage: HashMap<String, usize> = HashMap::new();
        let mut batches: HashSet<Option<&str>> = HashSet::new();
        let mut expert_count = 0usize;

        for e in entries {
            *faculty_load.entry(e.faculty_id.clone()).or_insert(0) += 1;
            *classroom_usage.entry(e.classroom_id.clone()).or_insert(0) += 1;
            batches.insert(e.batch_id.as_deref());

            let is_expert = catalog
                .faculty_member(&e.faculty_id)
                .is_some_and(|f| f.is_expert_in(&e.subject_id));
            if is_expert {
                expert_count += 1;
            }
        }

        let entry_count = entries.len();
        let batch_count = batches.len();
        let capacity = grid.placeable_cell_count() * batch_count;

        let fill_rate = if capacity > 0 {
            entry_count as f64 / capacity as f64
        } else {
            0.0
        };
        let expert_coverage = if entry_count > 0 {
            expert_count as f64 / entry_count as f64
        } else {
            0.0
        };
        let max_faculty_load = faculty_load.values().copied().max().unwrap_or(0);

        Self {
            entry_count,
            batch_count,
            fill_rate,
            expert_coverage,
            faculty_load,
            classroom_usage,
            max_faculty_load,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Faculty;

    fn entry(day: &str, period: &str, subject: &str, faculty: &str, room: &str, batch: Option<&str>) -> ScheduleEntry {
        ScheduleEntry {
            day: day.into(),
            period: period.into(),
            subject_id: subject.into(),
            subject_name: String::new(),
            faculty_id: faculty.into(),
            faculty_name: String::new(),
            classroom_id: room.into(),
            classroom_name: String::new(),
            batch_id: batch.map(String::from),
            batch_name: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_faculty(Faculty::new("F1").with_expertise("A"))
            .with_faculty(Faculty::new("F2").with_expertise("B"))
    }

    #[test]
    fn test_kpi_single_batch() {
        let grid = TimeGrid::from_labels(["Mon"], ["P1", "P2", "P3", "P4"]);
        let entries = vec![
            entry("Mon", "P1", "A", "F1", "C1", None),
            entry("Mon", "P2", "A", "F2", "C1", None), // non-expert
            entry("Mon", "P3", "B", "F2", "C2", None),
        ];

        let kpi = TimetableKpi::calculate(&entries, &grid, &catalog());
        assert_eq!(kpi.entry_count, 3);
        assert_eq!(kpi.batch_count, 1);
        assert!((kpi.fill_rate - 0.75).abs() < 1e-10);
        assert!((kpi.expert_coverage - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(kpi.faculty_load["F2"], 2);
        assert_eq!(kpi.classroom_usage["C1"], 2);
        assert_eq!(kpi.max_faculty_load, 2);
    }

    #[test]
    fn test_kpi_combined() {
        let grid = TimeGrid::from_labels(["Mon"], ["P1", "P2"]);
        let entries = vec![
            entry("Mon", "P1", "A", "F1", "C1", Some("X")),
            entry("Mon", "P1", "B", "F2", "C2", Some("Y")),
            entry("Mon", "P2", "B", "F2", "C1", Some("X")),
        ];

        let kpi = TimetableKpi::calculate(&entries, &grid, &catalog());
        assert_eq!(kpi.batch_count, 2);
        assert!((kpi.fill_rate - 0.75).abs() < 1e-10);
        assert!((kpi.expert_coverage - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(&[], &TimeGrid::default(), &Catalog::new());
        assert_eq!(kpi.entry_count, 0);
        assert_eq!(kpi.fill_rate, 0.0);
        assert_eq!(kpi.expert_coverage, 0.0);
        assert_eq!(kpi.max_faculty_load, 0);
    }
}
