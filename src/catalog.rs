//! Course catalog built from flat section rows.
//!
//! Registrar exports list one row per section. The catalog groups rows
//! into [`Course`]s (keyed by subject + catalog number) and, within a
//! course, into components, preserving first-appearance order for both.
//!
//! # Row Format
//!
//! | Field | Example | Notes |
//! |-------|---------|-------|
//! | `Subject` | `COMPSCI` | |
//! | `Catalog Number` | `61A` | |
//! | `Course Title` | `Structure and Interpretation` | optional |
//! | `Course Component` | `LEC` | |
//! | `Section` | `001` | |
//! | `Meeting Days` | `MWF` | blank = asynchronous |
//! | `Start Time` / `End Time` | `14:00` | blank = asynchronous |
//! | `Facility` | `Wheeler 150` | optional |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::models::{Course, CourseBuilder, DaySet, MeetingPattern, Section};
use crate::validation::validate_courses;

/// One section row as supplied by the course-data loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Catalog Number")]
    pub catalog_number: String,
    #[serde(rename = "Course Title", default)]
    pub title: String,
    #[serde(rename = "Course Component")]
    pub component: String,
    #[serde(rename = "Section")]
    pub section: String,
    #[serde(rename = "Meeting Days", default)]
    pub meeting_days: String,
    #[serde(rename = "Start Time", default)]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: String,
    #[serde(rename = "Facility", default)]
    pub facility: Option<String>,
}

impl SectionRecord {
    /// Course identifier: `"{subject} {catalog number}"`.
    pub fn course_id(&self) -> String {
        format!("{} {}", self.subject.trim(), self.catalog_number.trim())
    }

    /// Section identifier: `"{component} {section}"`, unique within a course.
    pub fn section_id(&self) -> String {
        format!("{} {}", self.component.trim(), self.section.trim())
    }

    /// Converts the row into a [`Section`].
    ///
    /// # Errors
    /// `UnknownDay`, `MalformedTime`, or `InvertedTimeRange` for a row
    /// with a bad meeting.
    pub fn to_section(&self) -> Result<Section> {
        let mut section = Section::new(
            self.section_id(),
            self.course_id(),
            self.component.trim(),
        );

        let days = self.meeting_days.trim();
        let (start, end) = (self.start_time.trim(), self.end_time.trim());
        if !days.is_empty() && !start.is_empty() && !end.is_empty() {
            section = section.with_meeting(MeetingPattern::new(DaySet::parse(days)?, start, end)?);
        }

        if let Some(facility) = self.facility.as_deref().map(str::trim) {
            if !facility.is_empty() {
                section = section.with_facility(facility);
            }
        }
        Ok(section)
    }
}

/// All courses known to the loader, in first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Groups section rows into courses.
    ///
    /// # Example
    /// ```
    /// use u_timetable::catalog::{Catalog, SectionRecord};
    ///
    /// let rows: Vec<SectionRecord> = serde_json::from_str(r#"[
    ///   {"Subject": "MATH", "Catalog Number": "1A", "Course Component": "LEC",
    ///    "Section": "001", "Meeting Days": "MWF", "Start Time": "9:00", "End Time": "9:50"},
    ///   {"Subject": "MATH", "Catalog Number": "1A", "Course Component": "DIS",
    ///    "Section": "101", "Meeting Days": "TR", "Start Time": "8:00", "End Time": "8:50"}
    /// ]"#).unwrap();
    ///
    /// let catalog = Catalog::from_records(rows).unwrap();
    /// let math = catalog.course("MATH 1A").unwrap();
    /// assert_eq!(math.component_types().collect::<Vec<_>>(), ["LEC", "DIS"]);
    /// ```
    pub fn from_records(records: impl IntoIterator<Item = SectionRecord>) -> Result<Self> {
        let mut builders: Vec<CourseBuilder> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut rows = 0usize;

        for record in records {
            rows += 1;
            let section = record.to_section()?;
            let slot = *index.entry(section.course_id.clone()).or_insert_with(|| {
                let title = record.title.trim();
                builders.push(CourseBuilder::new(section.course_id.clone()).with_name(title));
                builders.len() - 1
            });
            builders[slot].push_section(section);
        }

        let courses = builders
            .into_iter()
            .map(CourseBuilder::build)
            .collect::<Result<Vec<_>>>()?;

        debug!(rows, courses = courses.len(), "built course catalog");
        Ok(Self { courses })
    }

    /// All courses.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Finds a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    /// Courses whose id starts with `query` (case-insensitive).
    pub fn matching(&self, query: &str) -> Vec<&Course> {
        let query = query.trim().to_ascii_uppercase();
        self.courses
            .iter()
            .filter(|c| c.id().to_ascii_uppercase().starts_with(&query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Picks courses by id, in the given order, ready for the solver.
    ///
    /// # Errors
    /// - `UnknownCourse` for an id not in the catalog
    /// - `Invalid` if the selection fails validation (e.g. an id repeated)
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Course>> {
        let selected = ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.course(id)
                    .cloned()
                    .ok_or_else(|| ScheduleError::UnknownCourse(id.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        validate_courses(&selected).map_err(ScheduleError::Invalid)?;
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;
    use crate::solver::ScheduleSolver;

    const ROWS: &str = r#"[
        {"Subject": "CS", "Catalog Number": "61A", "Course Title": "SICP",
         "Course Component": "LEC", "Section": "001",
         "Meeting Days": "MWF", "Start Time": "14:00", "End Time": "14:59",
         "Facility": "Wheeler 150"},
        {"Subject": "CS", "Catalog Number": "61A", "Course Component": "DIS",
         "Section": "101", "Meeting Days": "TR", "Start Time": "9:00", "End Time": "9:59"},
        {"Subject": "CS", "Catalog Number": "61A", "Course Component": "DIS",
         "Section": "102", "Meeting Days": "W", "Start Time": "14:30", "End Time": "15:29"},
        {"Subject": "MATH", "Catalog Number": "54", "Course Component": "LEC",
         "Section": "001", "Meeting Days": "TR", "Start Time": "9:30", "End Time": "10:59"},
        {"Subject": "MATH", "Catalog Number": "54", "Course Component": "LEC",
         "Section": "002", "Meeting Days": "", "Start Time": "", "End Time": "",
         "Facility": ""},
        {"Subject": "CS", "Catalog Number": "61B", "Course Component": "LEC",
         "Section": "001", "Meeting Days": "MWF", "Start Time": "10:00", "End Time": "10:59"}
    ]"#;

    fn catalog() -> Catalog {
        let rows: Vec<SectionRecord> = serde_json::from_str(ROWS).unwrap();
        Catalog::from_records(rows).unwrap()
    }

    #[test]
    fn test_grouping_preserves_order() {
        let catalog = catalog();
        let ids: Vec<_> = catalog.courses().iter().map(|c| c.id()).collect();
        assert_eq!(ids, ["CS 61A", "MATH 54", "CS 61B"]);

        let cs = catalog.course("CS 61A").unwrap();
        assert_eq!(cs.name(), "SICP");
        assert_eq!(cs.component_types().collect::<Vec<_>>(), ["LEC", "DIS"]);
        assert_eq!(cs.sections("DIS").map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_row_conversion() {
        let catalog = catalog();
        let lec = &catalog.course("CS 61A").unwrap().sections("LEC").unwrap()[0];
        assert_eq!(lec.id, "LEC 001");
        assert_eq!(lec.facility.as_deref(), Some("Wheeler 150"));
        assert!(lec.meets_on(Day::Friday));

        let online = &catalog.course("MATH 54").unwrap().sections("LEC").unwrap()[1];
        assert!(online.meeting.is_none());
        assert!(online.facility.is_none());
    }

    #[test]
    fn test_bad_rows_rejected() {
        let mut row: SectionRecord = serde_json::from_str(
            r#"{"Subject": "X", "Catalog Number": "1", "Course Component": "LEC",
                "Section": "1", "Meeting Days": "MX", "Start Time": "9:00", "End Time": "10:00"}"#,
        )
        .unwrap();
        assert_eq!(
            Catalog::from_records([row.clone()]).unwrap_err(),
            ScheduleError::UnknownDay('X')
        );

        row.meeting_days = "M".into();
        row.start_time = "9.00".into();
        assert!(matches!(
            Catalog::from_records([row]),
            Err(ScheduleError::MalformedTime(_))
        ));
    }

    #[test]
    fn test_matching() {
        let catalog = catalog();
        let found: Vec<_> = catalog.matching("cs 61").iter().map(|c| c.id()).collect();
        assert_eq!(found, ["CS 61A", "CS 61B"]);
        assert!(catalog.matching("PHYS").is_empty());
    }

    #[test]
    fn test_select_and_solve() {
        let catalog = catalog();
        let courses = catalog.select(&["MATH 54", "CS 61A"]).unwrap();
        let schedules = ScheduleSolver::new().solve(&courses);

        // MATH 001 clashes with DIS 101; DIS 102 clashes with LEC on W.
        let ids: Vec<_> = schedules.iter().map(|s| s.section_ids()).collect();
        assert_eq!(ids, vec![vec!["LEC 002", "LEC 001", "DIS 101"]]);
    }

    #[test]
    fn test_select_errors() {
        let catalog = catalog();
        assert_eq!(
            catalog.select(&["CS 70"]).unwrap_err(),
            ScheduleError::UnknownCourse("CS 70".into())
        );
        assert!(matches!(
            catalog.select(&["CS 61A", "CS 61A"]),
            Err(ScheduleError::Invalid(_))
        ));
    }
}
