//! Section model.
//!
//! A section is one schedulable offering of a course component
//! (e.g. lecture 001, discussion 104). Sections are built from
//! externally supplied course data and never mutated by the solver.

use serde::{Deserialize, Serialize};

use super::meeting::{conflicts, Day, MeetingPattern};

/// One schedulable offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier (catalog/section number).
    pub id: String,
    /// Owning course identifier.
    pub course_id: String,
    /// Component slot this section fills (`LEC`, `DIS`, `LAB`, ...).
    pub component: String,
    /// Weekly meeting. `None` = asynchronous, conflicts with nothing.
    pub meeting: Option<MeetingPattern>,
    /// Room or facility label, if known.
    pub facility: Option<String>,
}

impl Section {
    /// Creates an asynchronous section.
    pub fn new(
        id: impl Into<String>,
        course_id: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            component: component.into(),
            meeting: None,
            facility: None,
        }
    }

    /// Sets the weekly meeting pattern.
    pub fn with_meeting(mut self, meeting: MeetingPattern) -> Self {
        self.meeting = Some(meeting);
        self
    }

    /// Sets the facility label.
    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = Some(facility.into());
        self
    }

    /// Whether this section has no fixed weekly meeting.
    pub fn is_asynchronous(&self) -> bool {
        self.meeting.is_none_or(|m| m.days().is_empty())
    }

    /// Whether this section meets on `day`.
    pub fn meets_on(&self, day: Day) -> bool {
        self.meeting.is_some_and(|m| m.meets_on(day))
    }

    /// Whether the two sections cannot both be attended.
    #[inline]
    pub fn conflicts_with(&self, other: &Section) -> bool {
        conflicts(self.meeting.as_ref(), other.meeting.as_ref())
    }
}
