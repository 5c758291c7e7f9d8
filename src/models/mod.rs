//! Timetabling domain models.
//!
//! Catalog entities supplied by the caller and the entries produced by
//! the schedulers.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Subject | Task (with weekly load) |
//! | Faculty, Classroom | Resource |
//! | Batch | Task family sharing one calendar |
//! | TimeGrid | Discrete time horizon |
//! | ScheduleEntry | Assignment |

mod batch;
mod catalog;
mod resource;
mod schedule;
mod subject;
mod time_grid;

pub use batch::Batch;
pub use catalog::Catalog;
pub use resource::{Classroom, Faculty};
pub use schedule::{ExamScheduleEntry, ExamSession, ScheduleEntry};
pub use subject::Subject;
pub use time_grid::{BreakSpec, PeriodSlot, TimeGrid, TimeGridLayout};
