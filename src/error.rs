//! Error types for timetable construction.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while building meeting patterns, courses, or catalogs.
///
/// The solver itself never fails: an infeasible request yields an empty
/// sequence of schedules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// A time string is not `H:MM` (24-hour, minutes 00-59, before 24:00).
    #[error("malformed time '{0}': expected H:MM in 24-hour form")]
    MalformedTime(String),

    /// Start time falls after end time.
    #[error("start time {start} is after end time {end}")]
    InvertedTimeRange { start: String, end: String },

    /// A day symbol outside `MTWRFS`.
    #[error("unknown meeting day '{0}'")]
    UnknownDay(char),

    /// A declared component has no candidate sections.
    #[error("course '{course}': component '{component}' has no candidate sections")]
    EmptyComponent { course: String, component: String },

    /// A component is declared without sections, or sections are supplied
    /// for a component that was never declared.
    #[error("course '{course}': component '{component}' is not both declared and supplied")]
    UnknownComponent { course: String, component: String },

    /// The same component type is declared twice.
    #[error("course '{course}': component '{component}' declared more than once")]
    DuplicateComponent { course: String, component: String },

    /// Catalog lookup of a course that does not exist.
    #[error("unknown course '{0}'")]
    UnknownCourse(String),

    /// Cross-course validation failed.
    #[error("invalid course input: {} problem(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_messages() {
        let e = ScheduleError::MalformedTime("9h30".into());
        assert_eq!(
            e.to_string(),
            "malformed time '9h30': expected H:MM in 24-hour form"
        );

        let e = ScheduleError::EmptyComponent {
            course: "CS 61A".into(),
            component: "DIS".into(),
        };
        assert!(e.to_string().contains("CS 61A"));
        assert!(e.to_string().contains("DIS"));
    }

    #[test]
    fn test_invalid_counts_problems() {
        let e = ScheduleError::Invalid(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "a"),
            ValidationError::new(ValidationErrorKind::ForeignSection, "b"),
        ]);
        assert_eq!(e.to_string(), "invalid course input: 2 problem(s)");
    }
}
