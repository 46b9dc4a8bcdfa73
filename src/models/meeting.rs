//! Weekly meeting patterns and the conflict rule.
//!
//! A meeting pattern is a recurring block: a set of weekdays plus one
//! start/end time shared by every day in the set.
//!
//! # Time Model
//! Times are minutes since midnight in `[0, 1440)`, parsed from 24-hour
//! `H:MM` strings. Ranges are closed: `[start, end]`.
//!
//! # Conflict Rule
//! Two patterns conflict iff they share a day AND their closed ranges
//! intersect. Blocks that touch at a boundary minute (10:00 end, 10:00
//! start) therefore conflict. [`ranges_overlap`] is the only place this
//! comparison is made.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScheduleError};

/// Minutes in a day. Valid times are strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A weekday on which a section may meet. Sunday is not schedulable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "M")]
    Monday,
    #[serde(rename = "T")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "R")]
    Thursday,
    #[serde(rename = "F")]
    Friday,
    #[serde(rename = "S")]
    Saturday,
}

impl Day {
    /// All days in calendar order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Parses a single day symbol (`M`, `T`, `W`, `R`, `F`, `S`).
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            'M' => Ok(Day::Monday),
            'T' => Ok(Day::Tuesday),
            'W' => Ok(Day::Wednesday),
            'R' => Ok(Day::Thursday),
            'F' => Ok(Day::Friday),
            'S' => Ok(Day::Saturday),
            other => Err(ScheduleError::UnknownDay(other)),
        }
    }

    /// The one-letter symbol used in course data.
    pub fn symbol(self) -> char {
        match self {
            Day::Monday => 'M',
            Day::Tuesday => 'T',
            Day::Wednesday => 'W',
            Day::Thursday => 'R',
            Day::Friday => 'F',
            Day::Saturday => 'S',
        }
    }

    /// Short column label (`Mon` .. `Sat`).
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
            Day::Friday => "Fri",
            Day::Saturday => "Sat",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A set of meeting days, stored as a bitmask.
///
/// Serializes as its symbol string (`"MWF"`). An empty set means the
/// section has no fixed weekly meeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DaySet(u8);

impl DaySet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Parses a symbol string such as `"MWF"` or `"TR"`.
    ///
    /// Whitespace is ignored; repeated symbols are harmless.
    pub fn parse(symbols: &str) -> Result<Self> {
        symbols
            .chars()
            .filter(|c| !c.is_whitespace())
            .try_fold(Self::empty(), |set, c| Ok(set.with(Day::from_symbol(c)?)))
    }

    /// Adds a day.
    pub fn with(self, day: Day) -> Self {
        Self(self.0 | day.bit())
    }

    /// Whether the set contains `day`.
    #[inline]
    pub fn contains(self, day: Day) -> bool {
        self.0 & day.bit() != 0
    }

    /// Days present in both sets.
    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in calendar order.
    pub fn iter(self) -> impl Iterator<Item = Day> {
        Day::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Day> for DaySet {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), DaySet::with)
    }
}

impl TryFrom<String> for DaySet {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DaySet> for String {
    fn from(set: DaySet) -> Self {
        set.to_string()
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|d| write!(f, "{}", d.symbol()))
    }
}

/// Parses a 24-hour `H:MM` string into minutes since midnight.
///
/// Hours may have any number of digits (`9:05`, `09:05`) but the result
/// must fall before midnight. Minutes must be exactly two digits, 00-59.
pub fn parse_time(text: &str) -> Result<u16> {
    let malformed = || ScheduleError::MalformedTime(text.to_string());

    let (hours, minutes) = text.trim().split_once(':').ok_or_else(malformed)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || minutes.len() != 2 || !all_digits(minutes) {
        return Err(malformed());
    }

    let hours: u32 = hours.parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
    if minutes > 59 {
        return Err(malformed());
    }

    let total = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .filter(|&t| t < u32::from(MINUTES_PER_DAY))
        .ok_or_else(malformed)?;
    Ok(total as u16)
}

/// Formats minutes since midnight as `H:MM` (no leading zero on hours).
pub fn format_time(minutes: u16) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Closed-interval overlap test shared by every conflict check.
#[inline]
pub fn ranges_overlap(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// A recurring weekly time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MeetingPatternDef")]
pub struct MeetingPattern {
    days: DaySet,
    start_minute: u16,
    end_minute: u16,
}

#[derive(Deserialize)]
struct MeetingPatternDef {
    days: DaySet,
    start_minute: u16,
    end_minute: u16,
}

impl TryFrom<MeetingPatternDef> for MeetingPattern {
    type Error = ScheduleError;

    fn try_from(def: MeetingPatternDef) -> Result<Self> {
        Self::from_minutes(def.days, def.start_minute, def.end_minute)
    }
}

impl MeetingPattern {
    /// Creates a pattern from a day set and two `H:MM` strings.
    ///
    /// # Errors
    /// `MalformedTime` if either string fails to parse,
    /// `InvertedTimeRange` if start is after end.
    ///
    /// # Example
    /// ```
    /// use u_timetable::models::{DaySet, MeetingPattern};
    ///
    /// let lec = MeetingPattern::new(DaySet::parse("MWF").unwrap(), "9:00", "9:50").unwrap();
    /// assert_eq!(lec.start_minute(), 540);
    /// assert_eq!(lec.to_string(), "MWF 9:00-9:50");
    /// ```
    pub fn new(days: DaySet, start: &str, end: &str) -> Result<Self> {
        Self::from_minutes(days, parse_time(start)?, parse_time(end)?)
    }

    /// Creates a pattern from minutes since midnight.
    pub fn from_minutes(days: DaySet, start_minute: u16, end_minute: u16) -> Result<Self> {
        for minute in [start_minute, end_minute] {
            if minute >= MINUTES_PER_DAY {
                return Err(ScheduleError::MalformedTime(minute.to_string()));
            }
        }
        if start_minute > end_minute {
            return Err(ScheduleError::InvertedTimeRange {
                start: format_time(start_minute),
                end: format_time(end_minute),
            });
        }
        Ok(Self {
            days,
            start_minute,
            end_minute,
        })
    }

    #[inline]
    pub fn days(&self) -> DaySet {
        self.days
    }

    #[inline]
    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    #[inline]
    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }

    /// Length of one meeting (minutes).
    pub fn duration_minutes(&self) -> u16 {
        self.end_minute - self.start_minute
    }

    /// Whether this pattern meets on `day`.
    pub fn meets_on(&self, day: Day) -> bool {
        self.days.contains(day)
    }

    /// Whether two patterns share a day and their times intersect.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.days.intersection(other.days).is_empty() {
            return false;
        }
        ranges_overlap(
            self.start_minute,
            self.end_minute,
            other.start_minute,
            other.end_minute,
        )
    }
}

impl fmt::Display for MeetingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.days,
            format_time(self.start_minute),
            format_time(self.end_minute)
        )
    }
}

/// Conflict predicate over optional patterns.
///
/// A missing pattern (asynchronous section) never conflicts.
pub fn conflicts(a: Option<&MeetingPattern>, b: Option<&MeetingPattern>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn pattern(days: &str, start: &str, end: &str) -> MeetingPattern {
        MeetingPattern::new(DaySet::parse(days).unwrap(), start, end).unwrap()
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("0:00").unwrap(), 0);
        assert_eq!(parse_time("9:05").unwrap(), 545);
        assert_eq!(parse_time("09:05").unwrap(), 545);
        assert_eq!(parse_time("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_parse_time_malformed() {
        for bad in [
            "", "9", "9:5", "9:60", "24:00", "x:00", "9:0a", ":30", "-1:00", "9:005",
            // hour fields whose minute count overflows u32
            "71582789:00", "4294967295:00", "99999999999:00",
        ] {
            assert_eq!(
                parse_time(bad),
                Err(ScheduleError::MalformedTime(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(545), "9:05");
        assert_eq!(format_time(1439), "23:59");
        assert_eq!(parse_time(&format_time(754)).unwrap(), 754);
    }

    #[test]
    fn test_day_set_parse() {
        let set = DaySet::parse("MWF").unwrap();
        assert!(set.contains(Day::Monday));
        assert!(set.contains(Day::Friday));
        assert!(!set.contains(Day::Thursday));
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "MWF");

        // order and duplicates do not matter
        assert_eq!(DaySet::parse("FWMM").unwrap(), set);
        assert!(DaySet::parse("").unwrap().is_empty());
        assert_eq!(DaySet::parse("MU"), Err(ScheduleError::UnknownDay('U')));
    }

    #[test]
    fn test_day_labels() {
        let labels: Vec<_> = Day::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
        assert_eq!(Day::Thursday.symbol(), 'R');
    }

    #[test]
    fn test_pattern_inverted_range() {
        let days = DaySet::parse("M").unwrap();
        assert!(matches!(
            MeetingPattern::new(days, "11:00", "10:00"),
            Err(ScheduleError::InvertedTimeRange { .. })
        ));
        // zero-length is allowed
        assert!(MeetingPattern::new(days, "10:00", "10:00").is_ok());
        assert!(MeetingPattern::from_minutes(days, 0, MINUTES_PER_DAY).is_err());
    }

    #[test]
    fn test_touching_boundary_conflicts() {
        let a = pattern("M", "9:00", "10:00");
        let b = pattern("M", "10:00", "11:00");
        assert!(conflicts(Some(&a), Some(&b)));
    }

    #[test]
    fn test_adjacent_minutes_do_not_conflict() {
        let a = pattern("M", "9:00", "9:59");
        let b = pattern("M", "10:00", "11:00");
        assert!(!conflicts(Some(&a), Some(&b)));
    }

    #[test]
    fn test_no_shared_day() {
        let a = pattern("MWF", "9:00", "10:00");
        let b = pattern("TR", "9:00", "10:00");
        assert!(!conflicts(Some(&a), Some(&b)));
    }

    #[test]
    fn test_partial_day_overlap() {
        let a = pattern("MWF", "10:00", "12:29");
        let b = pattern("WF", "10:30", "12:29");
        let c = pattern("R", "10:30", "12:29");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_absent_pattern_never_conflicts() {
        let a = pattern("MTWRFS", "0:00", "23:59");
        assert!(!conflicts(None, Some(&a)));
        assert!(!conflicts(Some(&a), None));
        assert!(!conflicts(None, None));
    }

    #[test]
    fn test_empty_days_never_conflict() {
        let tba = MeetingPattern::new(DaySet::empty(), "9:00", "10:00").unwrap();
        let a = pattern("M", "9:00", "10:00");
        assert!(!tba.overlaps(&a));
    }

    #[test]
    fn test_conflicts_random_properties() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..2000 {
            let mut random_pattern = || {
                let days: DaySet = Day::ALL
                    .into_iter()
                    .filter(|_| rng.random_bool(0.3))
                    .collect();
                let start = rng.random_range(0..MINUTES_PER_DAY);
                let end = rng.random_range(start..MINUTES_PER_DAY);
                MeetingPattern::from_minutes(days, start, end).unwrap()
            };
            let a = random_pattern();
            let b = random_pattern();

            assert_eq!(a.overlaps(&b), b.overlaps(&a));
            if a.days().intersection(b.days()).is_empty() {
                assert!(!a.overlaps(&b));
            }
        }
    }

    #[test]
    fn test_display_and_serde() {
        let p = pattern("TR", "14:30", "15:45");
        assert_eq!(p.to_string(), "TR 14:30-15:45");

        let json = serde_json::to_string(&p.days()).unwrap();
        assert_eq!(json, "\"TR\"");
        let back: DaySet = serde_json::from_str("\"RT\"").unwrap();
        assert_eq!(back, p.days());
        assert!(serde_json::from_str::<DaySet>("\"MX\"").is_err());

        let inverted = r#"{"days": "M", "start_minute": 600, "end_minute": 540}"#;
        assert!(serde_json::from_str::<MeetingPattern>(inverted).is_err());
    }
}
