//! Solution evaluator that computes cost and checks feasibility.

use std::collections::BTreeMap;

use crate::models::{CarpProblem, Route, Violation, ViolationType};

/// Evaluates routes against a problem: total cost plus violations of
/// capacity, depot closure, demand bookkeeping and task coverage.
///
/// # Examples
///
/// ```
/// use u_carp::models::{CarpProblem, Route, ServiceTask};
/// use u_carp::distance::DistanceMatrix;
/// use u_carp::evaluation::SolutionEvaluator;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let task = ServiceTask::node(1, 1, 3, 0.0);
/// let problem = CarpProblem::new(vec![task.clone()], 0, 10, dm);
///
/// let evaluator = SolutionEvaluator::new(&problem);
/// let routes = vec![Route::singleton(task, 0)];
/// let (cost, violations) = evaluator.evaluate(&routes);
/// assert!((cost - 2.0).abs() < 1e-10);
/// assert!(violations.is_empty());
/// ```
pub struct SolutionEvaluator<'a> {
    problem: &'a CarpProblem,
}

impl<'a> SolutionEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a CarpProblem) -> Self {
        Self { problem }
    }

    /// Checks a single route's own invariants.
    pub fn check_route(&self, route_index: usize, route: &Route) -> Vec<Violation> {
        let mut violations = Vec::new();
        let depot = self.problem.depot();

        let stops = route.stops();
        if stops.len() < 2 || stops[0] != depot || stops[stops.len() - 1] != depot {
            violations.push(Violation::new(ViolationType::DepotNotClosed { route_index }));
        }

        if route.demand() > self.problem.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                demand: route.demand(),
                capacity: self.problem.capacity(),
            }));
        }

        let actual: i32 = route.clients().iter().map(|c| c.demand()).sum();
        if actual != route.demand() {
            violations.push(Violation::new(ViolationType::DemandMismatch {
                route_index,
                recorded: route.demand(),
                actual,
            }));
        }

        violations
    }

    /// Checks that every task is served exactly once and nothing else is.
    pub fn check_coverage(&self, routes: &[Route]) -> Vec<Violation> {
        let mut counts: BTreeMap<_, usize> =
            self.problem.tasks().iter().map(|t| (t.key(), 0)).collect();
        let mut violations = Vec::new();

        for route in routes {
            for client in route.clients() {
                match counts.get_mut(&client.key()) {
                    Some(count) => *count += 1,
                    None => violations.push(Violation::new(ViolationType::UnknownTask {
                        task: client.key(),
                    })),
                }
            }
        }

        for (task, count) in counts {
            match count {
                0 => violations.push(Violation::new(ViolationType::TaskMissing { task })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::TaskDuplicated { task })),
            }
        }
        violations
    }

    /// Evaluates a full set of routes, returning `(cost, violations)`.
    ///
    /// A feasible solution has an empty violations list.
    pub fn evaluate(&self, routes: &[Route]) -> (f64, Vec<Violation>) {
        let distances = self.problem.distances();
        let mut total_cost = 0.0;
        let mut violations = Vec::new();

        for (idx, route) in routes.iter().enumerate() {
            total_cost += route.cost(distances);
            violations.extend(self.check_route(idx, route));
        }
        violations.extend(self.check_coverage(routes));

        (total_cost, violations)
    }
}
