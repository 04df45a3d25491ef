//! GRASP restart loop.
//!
//! # Algorithm
//!
//! Every restart shuffles the task order, which is the only source of
//! randomness, and then runs the deterministic pipeline
//!
//! ```text
//! singletons → savings merge → 2-opt → reallocation → refusion
//! ```
//!
//! The cheapest solution over all restarts is returned; ties go to the
//! earliest restart. One sub-seed per restart is drawn up front from the
//! injected random source, so running the restarts on the rayon pool gives
//! exactly the same result as running them in order.
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::constructive::{initial_routes, savings_merge};
use crate::error::{CarpError, Result};
use crate::evaluation::SolutionEvaluator;
use crate::local_search::{reallocate_small_routes, refuse_routes, two_opt_routes};
use crate::models::{CarpProblem, ServiceTask, Solution};

use super::GraspConfig;

/// Outcome of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    best: Solution,
    best_iteration: usize,
    iteration_costs: Vec<f64>,
}

impl GraspResult {
    /// The cheapest solution found.
    pub fn best(&self) -> &Solution {
        &self.best
    }

    /// Consumes the result, returning the best solution.
    pub fn into_best(self) -> Solution {
        self.best
    }

    /// Index of the restart that produced the best solution.
    pub fn best_iteration(&self) -> usize {
        self.best_iteration
    }

    /// Total cost reached by each restart, in restart order.
    pub fn iteration_costs(&self) -> &[f64] {
        &self.iteration_costs
    }
}

/// Running reduction over restarts: the cost of every restart seen and the
/// single cheapest solution, ties going to the lower restart index.
#[derive(Debug, Default)]
struct BestSoFar {
    costs: Vec<(usize, f64)>,
    best: Option<(usize, Solution)>,
}

impl BestSoFar {
    fn record(mut self, (index, solution): (usize, Solution)) -> Self {
        self.costs.push((index, solution.total_cost()));
        self.offer(index, solution);
        self
    }

    fn merge(mut self, other: BestSoFar) -> Self {
        self.costs.extend(other.costs);
        if let Some((index, solution)) = other.best {
            self.offer(index, solution);
        }
        self
    }

    fn offer(&mut self, index: usize, solution: Solution) {
        let replace = match &self.best {
            None => true,
            Some((held, current)) => {
                let (cost, held_cost) = (solution.total_cost(), current.total_cost());
                cost < held_cost || (cost == held_cost && index < *held)
            }
        };
        if replace {
            self.best = Some((index, solution));
        }
    }

    /// Costs in restart order.
    fn into_parts(mut self) -> (Vec<f64>, Option<(usize, Solution)>) {
        self.costs.sort_by_key(|&(index, _)| index);
        let costs = self.costs.into_iter().map(|(_, cost)| cost).collect();
        (costs, self.best)
    }
}

/// Runs the construction and improvement pipeline once for a task order.
///
/// # Arguments
///
/// * `problem` — Validated problem
/// * `order` — Tasks in the order their singleton routes are created
/// * `config` — Merge threshold, 2-opt cap and reallocation slack
pub fn run_iteration(problem: &CarpProblem, order: &[ServiceTask], config: &GraspConfig) -> Solution {
    let depot = problem.depot();
    let capacity = problem.capacity();
    let distances = problem.distances();

    let routes = initial_routes(order, depot);
    let mut routes = savings_merge(routes, distances, depot, capacity, config.min_gain);
    two_opt_routes(&mut routes, distances, config.two_opt_max_iterations);
    let routes =
        reallocate_small_routes(routes, capacity, distances, depot, config.insertion_slack);
    let routes = refuse_routes(routes, distances, depot, capacity, config.min_gain);

    Solution::evaluated(routes, distances)
}

/// Randomized-restart solver for mixed node, edge and arc routing.
///
/// # Examples
///
/// ```
/// use u_carp::models::{CarpProblem, ServiceTask};
/// use u_carp::distance::DistanceMatrix;
/// use u_carp::grasp::{GraspConfig, GraspSolver};
///
/// #[rustfmt::skip]
/// let dm = DistanceMatrix::from_data(4, vec![
///     0.0, 1.0, 1.0, 1.0,
///     1.0, 0.0, 1.0, 5.0,
///     1.0, 1.0, 0.0, 5.0,
///     1.0, 5.0, 5.0, 0.0,
/// ]).unwrap();
/// let tasks = vec![
///     ServiceTask::node(1, 1, 4, 0.0),
///     ServiceTask::node(2, 2, 4, 0.0),
///     ServiceTask::node(3, 3, 4, 0.0),
/// ];
/// let problem = CarpProblem::new(tasks, 0, 10, dm);
///
/// let result = GraspSolver::new(GraspConfig::default()).solve(&problem).unwrap();
/// assert_eq!(result.best().num_routes(), 2);
/// assert_eq!(result.iteration_costs().len(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraspSolver {
    config: GraspConfig,
}

impl GraspSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: GraspConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    /// Solves with a random source seeded from the configuration.
    pub fn solve(&self, problem: &CarpProblem) -> Result<GraspResult> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.solve_with_rng(problem, &mut rng)
    }

    /// Solves drawing restart seeds from `rng`.
    ///
    /// The problem is validated first. The returned best solution has been
    /// checked for coverage, capacity and depot closure; a failed check is
    /// reported as [`CarpError::InvariantViolation`].
    pub fn solve_with_rng<R: Rng>(&self, problem: &CarpProblem, rng: &mut R) -> Result<GraspResult> {
        problem.validate()?;

        let iterations = self.config.iterations.max(1);
        let seeds: Vec<u64> = (0..iterations).map(|_| rng.random()).collect();

        let restart = |(index, seed): (usize, u64)| {
            let mut order = problem.tasks().to_vec();
            order.shuffle(&mut StdRng::seed_from_u64(seed));
            let solution = run_iteration(problem, &order, &self.config);
            log::info!(
                "grasp iteration {index}: cost={:.3} routes={}",
                solution.total_cost(),
                solution.num_routes()
            );
            (index, solution)
        };

        let search = if self.config.parallel {
            seeds
                .into_par_iter()
                .enumerate()
                .map(restart)
                .fold(BestSoFar::default, BestSoFar::record)
                .reduce(BestSoFar::default, BestSoFar::merge)
        } else {
            seeds
                .into_iter()
                .enumerate()
                .map(restart)
                .fold(BestSoFar::default(), BestSoFar::record)
        };

        let (iteration_costs, best) = search.into_parts();
        let (best_iteration, best) = best.unwrap_or_default();

        let (_, violations) = SolutionEvaluator::new(problem).evaluate(best.routes());
        if !violations.is_empty() {
            log::warn!("grasp best solution failed validation: {violations:?}");
            return Err(CarpError::InvariantViolation(format!("{violations:?}")));
        }

        log::info!(
            "grasp best: iteration={best_iteration} cost={:.3} routes={}",
            best.total_cost(),
            best.num_routes()
        );
        Ok(GraspResult {
            best,
            best_iteration,
            iteration_costs,
        })
    }
}
