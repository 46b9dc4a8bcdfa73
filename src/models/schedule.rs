//! Schedule (solution) model.
//!
//! A schedule is one complete, conflict-free selection: exactly one
//! section per component of every requested course. Sections are
//! borrowed from the input courses, so a schedule cannot outlive them.

use serde::Serialize;

use super::meeting::Day;
use super::Section;

/// A complete conflict-free timetable.
///
/// Sections appear in search order: course by course, and within a course
/// in component order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule<'a> {
    sections: Vec<&'a Section>,
}

impl<'a> Schedule<'a> {
    pub(crate) fn new(sections: Vec<&'a Section>) -> Self {
        Self { sections }
    }

    /// Selected sections in search order.
    pub fn sections(&self) -> &[&'a Section] {
        &self.sections
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Section> + '_ {
        self.sections.iter().copied()
    }

    /// Number of selected sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section ids in order.
    pub fn section_ids(&self) -> Vec<&'a str> {
        self.iter().map(|s| s.id.as_str()).collect()
    }

    /// Sections chosen for one course.
    pub fn sections_for_course(&self, course_id: &str) -> Vec<&'a Section> {
        self.iter().filter(|s| s.course_id == course_id).collect()
    }

    /// The section chosen for a (course, component) slot.
    pub fn section_for(&self, course_id: &str, component: &str) -> Option<&'a Section> {
        self.iter()
            .find(|s| s.course_id == course_id && s.component == component)
    }

    /// Sections meeting on `day`, ordered by start time.
    ///
    /// Ties keep search order.
    pub fn sections_on(&self, day: Day) -> Vec<&'a Section> {
        let mut out: Vec<_> = self.iter().filter(|s| s.meets_on(day)).collect();
        out.sort_by_key(|s| s.meeting.map(|m| m.start_minute()));
        out
    }

    /// Whether any section meets on `day`.
    pub fn meets_on(&self, day: Day) -> bool {
        self.iter().any(|s| s.meets_on(day))
    }

    /// Earliest start and latest end over all timed sections.
    ///
    /// Returns `None` if every section is asynchronous.
    pub fn time_span(&self) -> Option<(u16, u16)> {
        self.iter()
            .filter_map(|s| s.meeting)
            .filter(|m| !m.days().is_empty())
            .map(|m| (m.start_minute(), m.end_minute()))
            .reduce(|(start, end), (s, e)| (start.min(s), end.max(e)))
    }

    /// Total weekly class time (minutes).
    pub fn weekly_minutes(&self) -> u32 {
        self.iter()
            .filter_map(|s| s.meeting)
            .map(|m| u32::from(m.duration_minutes()) * m.days().len() as u32)
            .sum()
    }

    /// Re-checks every pair for conflicts.
    pub fn is_conflict_free(&self) -> bool {
        self.sections.iter().enumerate().all(|(i, a)| {
            self.sections[i + 1..]
                .iter()
                .all(|b| !a.conflicts_with(b))
        })
    }
}

impl<'s, 'a> IntoIterator for &'s Schedule<'a> {
    type Item = &'a Section;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a Section>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySet, MeetingPattern};

    fn section(id: &str, course: &str, component: &str, days: &str, start: &str, end: &str) -> Section {
        Section::new(id, course, component).with_meeting(
            MeetingPattern::new(DaySet::parse(days).unwrap(), start, end).unwrap(),
        )
    }

    fn sample_sections() -> Vec<Section> {
        vec![
            section("A-L", "A", "LEC", "MWF", "10:00", "10:50"),
            section("A-D", "A", "DIS", "T", "8:00", "8:50"),
            section("B-L", "B", "LEC", "TR", "14:00", "15:15"),
            Section::new("C-L", "C", "LEC"),
        ]
    }

    #[test]
    fn test_queries() {
        let sections = sample_sections();
        let schedule = Schedule::new(sections.iter().collect());

        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.section_ids(), ["A-L", "A-D", "B-L", "C-L"]);
        assert_eq!(schedule.sections_for_course("A").len(), 2);
        assert_eq!(schedule.section_for("B", "LEC").map(|s| s.id.as_str()), Some("B-L"));
        assert!(schedule.section_for("B", "DIS").is_none());
    }

    #[test]
    fn test_sections_on_day_sorted() {
        let sections = sample_sections();
        let schedule = Schedule::new(sections.iter().rev().collect());

        let tuesday: Vec<_> = schedule
            .sections_on(Day::Tuesday)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(tuesday, ["A-D", "B-L"]);
        assert!(schedule.meets_on(Day::Friday));
        assert!(!schedule.meets_on(Day::Saturday));
    }

    #[test]
    fn test_time_span_and_minutes() {
        let sections = sample_sections();
        let schedule = Schedule::new(sections.iter().collect());

        assert_eq!(schedule.time_span(), Some((480, 915)));
        // 3*50 + 50 + 2*75
        assert_eq!(schedule.weekly_minutes(), 350);

        let online = [Section::new("X", "X", "LEC")];
        assert_eq!(Schedule::new(online.iter().collect()).time_span(), None);
    }

    #[test]
    fn test_conflict_recheck() {
        let sections = sample_sections();
        assert!(Schedule::new(sections.iter().collect()).is_conflict_free());

        let clash = section("D-L", "D", "LEC", "W", "10:30", "11:00");
        let mut refs: Vec<&Section> = sections.iter().collect();
        refs.push(&clash);
        assert!(!Schedule::new(refs).is_conflict_free());
    }

    #[test]
    fn test_serialize_as_section_list() {
        let sections = sample_sections();
        let schedule = Schedule::new(sections[3..].iter().collect());
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json[0]["id"], "C-L");
        assert_eq!(json[0]["meeting"], serde_json::Value::Null);
    }
}
