//! Academic timetabling.
//!
//! Generates weekly class timetables and exam session plans from a catalog
//! of subjects, faculty, classrooms and student batches. Placement is a
//! randomized greedy search: every call either returns a complete,
//! conflict-free timetable or fails with a [`TimetableError`].
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `Faculty`, `Classroom`, `Batch`,
//!   `Catalog`, `TimeGrid`, `ScheduleEntry`, `ExamScheduleEntry`
//! - **`rules`**: Structured scheduling rules and the free-text shim
//! - **`workload`**: Effective subject sets and hour normalization
//! - **`grid`**: Occupancy map over the placeable cells of a time grid
//! - **`scheduler`**: Single-batch, combined and exam schedulers, KPIs
//! - **`validation`**: Catalog integrity checks and conflict audits
//! - **`config`**: TOML configuration for grid layout, rules and exams
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Batch, Catalog, Classroom, Faculty, Subject, TimeGridLayout};
//! use u_timetable::scheduler::CombinedScheduler;
//! use u_timetable::validation::{find_class_conflicts, TimetableMode};
//!
//! let catalog = Catalog::new()
//!     .with_subject(Subject::new("MA101", 3).with_name("Calculus I"))
//!     .with_subject(Subject::new("CS101", 3).with_name("Programming"))
//!     .with_faculty(Faculty::new("F1").with_expertise("MA101"))
//!     .with_faculty(Faculty::new("F2").with_expertise("CS101"))
//!     .with_classroom(Classroom::new("R1"))
//!     .with_classroom(Classroom::new("R2"));
//! let batches = vec![
//!     Batch::new("CSE").with_subjects(["MA101", "CS101"]),
//!     Batch::new("ECE").with_subjects(["MA101", "CS101"]),
//! ];
//! let grid = TimeGridLayout::default().with_days(["Mon", "Tue"]).build();
//!
//! let entries = CombinedScheduler::new()
//!     .schedule(&batches, &catalog, &grid)
//!     .unwrap();
//! assert_eq!(entries.len(), 32);
//! assert!(find_class_conflicts(&entries, TimetableMode::Combined).is_empty());
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod rules;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{TimetableError, TimetableResult};
