//! Cross-course schedule search.
//!
//! [`ScheduleSolver`] enumerates every conflict-free combination of
//! course options by depth-first backtracking over the courses in the
//! order given. The order affects how early clashes are pruned, never
//! the set of schedules found.
//!
//! Infeasibility is not an error: a request with no valid timetable
//! yields an empty result.
//!
//! # Concurrency
//!
//! All search state lives in one [`Schedules`] value, so independent
//! solves never interfere. With [`SolverConfig::parallel`], each option
//! of the first course becomes its own search on the rayon pool and the
//! results are concatenated in branch order.

mod config;
mod search;

pub use config::SolverConfig;
pub use search::{SearchStats, Schedules};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, ScheduleError};
use crate::models::{Course, Schedule};
use crate::validation::validate_courses;

/// Exhaustive backtracking solver.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, DaySet, MeetingPattern, Section};
/// use u_timetable::solver::ScheduleSolver;
///
/// let mwf = DaySet::parse("MWF").unwrap();
/// let tr = DaySet::parse("TR").unwrap();
///
/// let math = Course::builder("MATH 1A")
///     .with_section(Section::new("001", "MATH 1A", "LEC")
///         .with_meeting(MeetingPattern::new(mwf, "9:00", "9:50").unwrap()))
///     .build()
///     .unwrap();
/// let chem = Course::builder("CHEM 1A")
///     .with_section(Section::new("001", "CHEM 1A", "LEC")
///         .with_meeting(MeetingPattern::new(tr, "9:00", "10:15").unwrap()))
///     .build()
///     .unwrap();
///
/// let courses = vec![math, chem];
/// let schedules = ScheduleSolver::new().solve(&courses);
/// assert_eq!(schedules.len(), 1);
/// assert_eq!(schedules[0].len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleSolver {
    config: SolverConfig,
}

impl ScheduleSolver {
    /// Creates a solver with the default (unlimited, sequential) config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Lazy sequence of all schedules, ignoring the configured limit.
    pub fn iter<'a>(&self, courses: &'a [Course]) -> Schedules<'a> {
        Schedules::new(courses)
    }

    /// Enumerates schedules for `courses` in search order.
    ///
    /// Courses are assumed valid (see [`solve_checked`](Self::solve_checked)).
    /// Returns an empty vector if no conflict-free schedule exists, or if
    /// `courses` is empty.
    pub fn solve<'a>(&self, courses: &'a [Course]) -> Vec<Schedule<'a>> {
        let search = Schedules::new(courses);
        debug!(
            courses = courses.len(),
            options = ?search.option_counts(),
            parallel = self.config.parallel,
            "starting schedule search"
        );

        let limit = self.config.effective_limit();
        let (schedules, stats) = if self.config.parallel {
            solve_parallel(search, limit)
        } else {
            solve_sequential(search, limit)
        };

        info!(
            schedules = schedules.len(),
            nodes_explored = stats.nodes_explored,
            branches_pruned = stats.branches_pruned,
            limited = schedules.len() >= limit,
            "schedule search finished"
        );
        schedules
    }

    /// Validates `courses` as a group, then solves.
    ///
    /// # Errors
    /// `ScheduleError::Invalid` with every problem found.
    pub fn solve_checked<'a>(&self, courses: &'a [Course]) -> Result<Vec<Schedule<'a>>> {
        validate_courses(courses).map_err(ScheduleError::Invalid)?;
        Ok(self.solve(courses))
    }

    /// Number of schedules, honoring the configured limit.
    pub fn count(&self, courses: &[Course]) -> usize {
        Schedules::new(courses)
            .take(self.config.effective_limit())
            .count()
    }
}

fn solve_sequential(mut search: Schedules<'_>, limit: usize) -> (Vec<Schedule<'_>>, SearchStats) {
    let schedules = search.by_ref().take(limit).collect();
    (schedules, search.stats())
}

fn solve_parallel(search: Schedules<'_>, limit: usize) -> (Vec<Schedule<'_>>, SearchStats) {
    let branches = search.split_first();
    let wave = rayon::current_num_threads().max(1);
    debug!(branches = branches.len(), wave, "searching top-level branches in parallel");

    let mut stats = SearchStats::default();
    let mut schedules = Vec::new();
    let mut pending = branches.into_iter();

    // Branches run a wave at a time, in order. Each branch only needs what
    // is still missing from the prefix, and no later wave starts once it is full.
    while schedules.len() < limit {
        let batch: Vec<_> = pending.by_ref().take(wave).collect();
        if batch.is_empty() {
            break;
        }
        let remaining = limit - schedules.len();
        let results: Vec<_> = batch
            .into_par_iter()
            .map(|branch| solve_sequential(branch, remaining))
            .collect();

        for (found, branch_stats) in results {
            stats.merge(branch_stats);
            schedules.extend(found);
        }
    }
    schedules.truncate(limit);
    (schedules, stats)
}
