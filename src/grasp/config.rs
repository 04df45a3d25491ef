//! GRASP driver configuration.

use serde::{Deserialize, Serialize};

use crate::local_search::DEFAULT_INSERTION_SLACK;

/// Parameters of the randomized-restart driver.
///
/// # Examples
///
/// ```
/// use u_carp::grasp::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_iterations(20)
///     .with_seed(7)
///     .with_parallel(true);
/// assert_eq!(config.iterations, 20);
/// assert!((config.min_gain - 0.1).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Number of restarts; at least one is always run.
    pub iterations: usize,
    /// Smallest transport saving for which two routes are merged.
    pub min_gain: f64,
    /// Cap on 2-opt sweeps per route.
    pub two_opt_max_iterations: usize,
    /// Multiplier of the reallocation detour ceiling.
    pub insertion_slack: f64,
    /// Seed of the random source used by [`GraspSolver::solve`](super::GraspSolver::solve).
    pub seed: u64,
    /// Run restarts on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            min_gain: 0.1,
            two_opt_max_iterations: 20,
            insertion_slack: DEFAULT_INSERTION_SLACK,
            seed: 42,
            parallel: false,
        }
    }
}

impl GraspConfig {
    /// Sets the number of restarts.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the minimum merge gain.
    pub fn with_min_gain(mut self, min_gain: f64) -> Self {
        self.min_gain = min_gain;
        self
    }

    /// Sets the 2-opt sweep cap.
    pub fn with_two_opt_max_iterations(mut self, max_iterations: usize) -> Self {
        self.two_opt_max_iterations = max_iterations;
        self
    }

    /// Sets the reallocation slack.
    pub fn with_insertion_slack(mut self, slack: f64) -> Self {
        self.insertion_slack = slack;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel restarts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraspConfig::default();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.two_opt_max_iterations, 20);
        assert!((config.insertion_slack - 2.0).abs() < 1e-10);
        assert_eq!(config.seed, 42);
        assert!(!config.parallel);
    }

    #[test]
    fn test_builders() {
        let config = GraspConfig::default()
            .with_min_gain(1.5)
            .with_two_opt_max_iterations(3)
            .with_insertion_slack(1.0);
        assert!((config.min_gain - 1.5).abs() < 1e-10);
        assert_eq!(config.two_opt_max_iterations, 3);
        assert!((config.insertion_slack - 1.0).abs() < 1e-10);
    }
}
