//! Timetable domain models.
//!
//! Provides the data types the search engine works over: weekly meeting
//! patterns, sections, courses with their component slots, and the
//! schedules the solver produces.
//!
//! # Domain Mappings
//!
//! | u-timetable | Registrar data | Meaning |
//! |-------------|----------------|---------|
//! | MeetingPattern | Meeting Days + Start/End Time | Weekly time block |
//! | Section | Class section | One attendable offering |
//! | Component | Course Component | Slot needing exactly one section |
//! | Course | Subject + Catalog Number | Set of required components |
//! | Schedule | Calendar | One section per slot, no clashes |

mod course;
mod meeting;
mod schedule;
mod section;

pub use course::{Component, Course, CourseBuilder, CourseOption};
pub use meeting::{
    conflicts, format_time, parse_time, ranges_overlap, Day, DaySet, MeetingPattern,
    MINUTES_PER_DAY,
};
pub use schedule::Schedule;
pub use section::Section;
