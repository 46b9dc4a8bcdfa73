//! Class timetable generation for the U-Engine ecosystem.
//!
//! Given the courses a student wants, picks one section per required
//! component (lecture, discussion, lab, ...) of every course and returns
//! every combination whose weekly meetings never clash.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `MeetingPattern`, `Section`, `Course`,
//!   `Schedule`, and the conflict predicate
//! - **`solver`**: `ScheduleSolver`, the exhaustive backtracking search
//! - **`catalog`**: Groups flat registrar rows into validated courses
//! - **`validation`**: Cross-course integrity checks (duplicate IDs, misfiled sections)
//! - **`error`**: `ScheduleError` for invalid times, days, and course definitions
//!
//! # Architecture
//!
//! Pure, synchronous, in-process library. Loading course data, rendering
//! calendars, and exporting schedules belong to the caller; this crate
//! only consumes parsed sections and returns schedules that borrow them.
//! Diagnostics are emitted through `tracing`; no subscriber is installed.
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6 (Backtracking Search)
//! - Knuth (2011), "The Art of Computer Programming", Vol. 4A, §7.2.2

pub mod catalog;
pub mod error;
pub mod models;
pub mod solver;
pub mod validation;

pub use error::{Result, ScheduleError};
