//! Solution and violation types.

use crate::distance::DistanceMatrix;

use super::{Route, TaskRef};

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Demand that exceeded capacity.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Stop sequence does not start and end at the depot.
    DepotNotClosed {
        /// Route index.
        route_index: usize,
    },
    /// Stored demand disagrees with the clients' demands.
    DemandMismatch {
        /// Route index.
        route_index: usize,
        /// Demand recorded on the route.
        recorded: i32,
        /// Sum of the clients' demands.
        actual: i32,
    },
    /// A task of the instance is served by no route.
    TaskMissing {
        /// Task identity.
        task: TaskRef,
    },
    /// A task is served by more than one route (or twice by one route).
    TaskDuplicated {
        /// Task identity.
        task: TaskRef,
    },
    /// A route serves a task the instance does not contain.
    UnknownTask {
        /// Task identity.
        task: TaskRef,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete set of routes together with its total cost.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Route, ServiceTask, Solution};
/// use u_carp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 2.0, 2.0, 0.0]).unwrap();
/// let routes = vec![Route::singleton(ServiceTask::node(1, 1, 1, 3.0), 0)];
/// let sol = Solution::evaluated(routes, &dm);
/// assert_eq!(sol.num_routes(), 1);
/// assert!((sol.total_cost() - 7.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Wraps routes and computes their total cost.
    pub fn evaluated(routes: Vec<Route>, distances: &DistanceMatrix) -> Self {
        let total_cost = routes.iter().map(|r| r.cost(distances)).sum();
        Self { routes, total_cost }
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the solution, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total transportation plus service cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Total demand across all routes.
    pub fn total_demand(&self) -> i32 {
        self.routes.iter().map(|r| r.demand()).sum()
    }

    /// Total number of tasks served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ServiceTask, TaskKind};

    #[test]
    fn test_solution_empty() {
        let sol = Solution::default();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.total_cost(), 0.0);
    }

    #[test]
    fn test_solution_totals() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0])
            .expect("square");
        let a = Route::singleton(ServiceTask::node(1, 1, 4, 1.0), 0);
        let b = Route::singleton(ServiceTask::edge(2, 1, 2, 5, 2.0), 0);
        let sol = Solution::evaluated(vec![a, b], &dm);
        assert_eq!(sol.num_served(), 2);
        assert_eq!(sol.total_demand(), 9);
        // (2 + 1) + (1 + 1 + 2 + 2)
        assert!((sol.total_cost() - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::TaskMissing {
            task: (TaskKind::Arc, 3),
        });
        assert_eq!(
            v.kind,
            ViolationType::TaskMissing {
                task: (TaskKind::Arc, 3)
            }
        );
    }
}
