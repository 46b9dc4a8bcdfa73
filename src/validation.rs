//! Input validation for a set of courses.
//!
//! Each [`Course`] already guarantees its own shape (declared components,
//! non-empty candidate lists). This module checks integrity across the
//! whole request before solving. Detects:
//! - Duplicate course IDs
//! - Duplicate section IDs within a course
//! - Sections filed under a course they do not belong to
//! - Sections filed under a component that does not match their tag

use crate::models::Course;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A section's `course_id` differs from the course holding it.
    ForeignSection,
    /// A section's `component` differs from the slot holding it.
    ComponentMismatch,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an ordered list of courses.
///
/// Checks:
/// 1. No duplicate course IDs
/// 2. No duplicate section IDs within one course
/// 3. Every section's `course_id` matches its course
/// 4. Every section's `component` matches its slot
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_courses(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_ids = HashSet::new();
    for course in courses {
        if !course_ids.insert(course.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id()),
            ));
        }

        let mut section_ids = HashSet::new();
        for component in course.components() {
            for section in &component.sections {
                if !section_ids.insert(section.id.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateId,
                        format!(
                            "Duplicate section ID '{}' in course '{}'",
                            section.id,
                            course.id()
                        ),
                    ));
                }

                if section.course_id != course.id() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ForeignSection,
                        format!(
                            "Section '{}' belongs to '{}' but is listed under '{}'",
                            section.id,
                            section.course_id,
                            course.id()
                        ),
                    ));
                }

                if section.component != component.kind {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ComponentMismatch,
                        format!(
                            "Section '{}' is a '{}' but fills the '{}' slot of '{}'",
                            section.id,
                            section.component,
                            component.kind,
                            course.id()
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
