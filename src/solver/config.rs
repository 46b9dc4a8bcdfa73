//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Controls how many schedules are produced and how the search runs.
///
/// Neither setting changes *which* schedules come back: a limited run
/// returns exactly the first `limit` schedules of the unlimited order,
/// and a parallel run returns the same sequence as a sequential one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Stop after this many schedules. `None` = enumerate all.
    pub limit: Option<usize>,
    /// Fan the first course's options out across the rayon thread pool.
    pub parallel: bool,
}

impl SolverConfig {
    /// Unlimited, sequential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of schedules returned.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Enables or disables top-level parallel search.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Effective cap (`usize::MAX` when unlimited).
    pub(crate) fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = SolverConfig::new().with_limit(10).with_parallel(true);
        assert_eq!(config.limit, Some(10));
        assert!(config.parallel);
        assert_eq!(config.effective_limit(), 10);
        assert_eq!(SolverConfig::default().effective_limit(), usize::MAX);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SolverConfig = serde_json::from_str(r#"{"limit": 25}"#).unwrap();
        assert_eq!(config, SolverConfig::new().with_limit(25));

        let config: SolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SolverConfig::default());
    }
}
