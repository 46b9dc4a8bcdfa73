//! Lazy depth-first schedule search.
//!
//! # Algorithm
//!
//! 1. Enumerate each course's conflict-free options (cached on the course).
//! 2. If any course has none, stop: no schedule exists.
//! 3. Walk courses in caller order, keeping a partial schedule and one
//!    cursor per depth (an explicit stack of choice points).
//! 4. At each depth try options in order; an option is accepted only if
//!    none of its sections conflicts with the partial schedule. Accepted
//!    sections are appended, then retracted when the search returns to
//!    that depth.
//! 5. When the last course is placed, the partial schedule is emitted.
//!
//! # Complexity
//! Bounded by the product of option counts, but only conflict-free
//! prefixes are ever extended.

use tracing::debug;

use crate::models::{Course, CourseOption, Schedule, Section};

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Options accepted into a partial schedule.
    pub nodes_explored: u64,
    /// Options rejected because they clashed with the partial schedule.
    pub branches_pruned: u64,
    /// Complete schedules produced.
    pub schedules_emitted: u64,
}

impl SearchStats {
    pub(crate) fn merge(&mut self, other: SearchStats) {
        self.nodes_explored += other.nodes_explored;
        self.branches_pruned += other.branches_pruned;
        self.schedules_emitted += other.schedules_emitted;
    }
}

/// Iterator over every conflict-free schedule, in depth-first order.
///
/// Created by [`ScheduleSolver::iter`](super::ScheduleSolver::iter).
/// Stopping early (e.g. with `take`) yields exactly a prefix of the full
/// sequence.
#[derive(Debug, Clone)]
pub struct Schedules<'a> {
    options: Vec<Vec<CourseOption<'a>>>,
    partial: Vec<&'a Section>,
    // cursors[d] = next option index to try for course d
    cursors: Vec<usize>,
    // marks[d] = partial length before course d's current option was placed
    marks: Vec<usize>,
    stats: SearchStats,
}

impl<'a> Schedules<'a> {
    pub(crate) fn new(courses: &'a [Course]) -> Self {
        let options: Vec<_> = courses.iter().map(Course::options).collect();

        if let Some((course, _)) = courses
            .iter()
            .zip(&options)
            .find(|(_, opts)| opts.is_empty())
        {
            debug!(
                course = %course.id(),
                "course has no conflict-free option; no schedule possible"
            );
        }

        Self::from_options(options)
    }

    fn from_options(options: Vec<Vec<CourseOption<'a>>>) -> Self {
        let feasible = !options.is_empty() && options.iter().all(|o| !o.is_empty());
        let capacity = options
            .iter()
            .map(|o| o.first().map_or(0, Vec::len))
            .sum();

        Self {
            cursors: if feasible { vec![0] } else { Vec::new() },
            marks: Vec::with_capacity(options.len()),
            partial: Vec::with_capacity(capacity),
            options,
            stats: SearchStats::default(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Option count per course, in search order.
    pub fn option_counts(&self) -> Vec<usize> {
        self.options.iter().map(Vec::len).collect()
    }

    /// Splits an unstarted search into one independent search per option
    /// of the first course. Concatenating the branches' output in order
    /// reproduces the unsplit sequence.
    pub(crate) fn split_first(self) -> Vec<Schedules<'a>> {
        if self.cursors.is_empty() {
            return Vec::new();
        }

        let mut options = self.options;
        let first = std::mem::take(&mut options[0]);
        first
            .into_iter()
            .map(|option| {
                let mut branch = options.clone();
                branch[0] = vec![option];
                Self::from_options(branch)
            })
            .collect()
    }

    fn clashes(&self, option: &CourseOption<'a>) -> bool {
        option
            .iter()
            .any(|s| self.partial.iter().any(|p| p.conflicts_with(s)))
    }
}

impl<'a> Iterator for Schedules<'a> {
    type Item = Schedule<'a>;

    fn next(&mut self) -> Option<Schedule<'a>> {
        loop {
            let depth = self.cursors.len().checked_sub(1)?;

            // Retract whatever this depth placed on the previous visit.
            if self.marks.len() > depth {
                if let Some(mark) = self.marks.pop() {
                    self.partial.truncate(mark);
                }
            }

            let start = self.cursors[depth];
            let mut accepted = None;
            for index in start..self.options[depth].len() {
                if self.clashes(&self.options[depth][index]) {
                    self.stats.branches_pruned += 1;
                } else {
                    accepted = Some(index);
                    break;
                }
            }

            let Some(index) = accepted else {
                // Exhausted: backtrack to the previous course.
                self.cursors.pop();
                continue;
            };

            self.cursors[depth] = index + 1;
            self.marks.push(self.partial.len());
            self.partial
                .extend(self.options[depth][index].iter().copied());
            self.stats.nodes_explored += 1;

            if depth + 1 == self.options.len() {
                self.stats.schedules_emitted += 1;
                return Some(Schedule::new(self.partial.clone()));
            }
            self.cursors.push(0);
        }
    }
}
