//! Arc routing problem instance.

use crate::distance::DistanceMatrix;
use crate::error::{CarpError, Result};

use super::ServiceTask;

/// A mixed capacitated arc routing problem: tasks, a single depot, a
/// homogeneous fleet capacity and the shortest-path distance matrix.
///
/// # Examples
///
/// ```
/// use u_carp::models::{CarpProblem, ServiceTask};
/// use u_carp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let problem = CarpProblem::new(vec![ServiceTask::node(1, 1, 3, 0.0)], 0, 10, dm);
/// assert!(problem.validate().is_ok());
/// assert_eq!(problem.min_routes(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CarpProblem {
    tasks: Vec<ServiceTask>,
    depot: usize,
    capacity: i32,
    distances: DistanceMatrix,
}

impl CarpProblem {
    /// Creates a problem instance.
    pub fn new(
        tasks: Vec<ServiceTask>,
        depot: usize,
        capacity: i32,
        distances: DistanceMatrix,
    ) -> Self {
        Self {
            tasks,
            depot,
            capacity,
            distances,
        }
    }

    /// Required service tasks.
    pub fn tasks(&self) -> &[ServiceTask] {
        &self.tasks
    }

    /// Depot vertex.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Shortest-path distances.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Sum of all task demands.
    pub fn total_demand(&self) -> i32 {
        self.tasks.iter().map(|t| t.demand()).sum()
    }

    /// Lower bound on the fleet size: `ceil(total_demand / capacity)`.
    pub fn min_routes(&self) -> usize {
        min_routes(self.total_demand(), self.capacity)
    }

    /// Checks the preconditions of the routing core.
    ///
    /// Capacity must be positive, every vertex referenced by the depot or a
    /// task must exist in the distance matrix, and no single task may
    /// demand more than one vehicle carries.
    pub fn validate(&self) -> Result<()> {
        if self.capacity <= 0 {
            return Err(CarpError::InvalidCapacity(self.capacity));
        }
        let size = self.distances.size();
        if !self.distances.contains(self.depot) {
            return Err(CarpError::MalformedTask {
                what: "depot".to_string(),
                vertex: self.depot,
                size,
            });
        }
        for task in &self.tasks {
            for vertex in [task.origin(), task.destination()] {
                if !self.distances.contains(vertex) {
                    return Err(CarpError::MalformedTask {
                        what: format!("task {}{}", task.kind(), task.id()),
                        vertex,
                        size,
                    });
                }
            }
            if task.demand() > self.capacity {
                return Err(CarpError::InfeasibleInstance {
                    kind: task.kind(),
                    id: task.id(),
                    demand: task.demand(),
                    capacity: self.capacity,
                });
            }
        }
        Ok(())
    }
}

/// `ceil(total_demand / capacity)`, zero when there is nothing to serve.
pub(crate) fn min_routes(total_demand: i32, capacity: i32) -> usize {
    if total_demand <= 0 || capacity <= 0 {
        return 0;
    }
    let (total, cap) = (i64::from(total_demand), i64::from(capacity));
    ((total + cap - 1) / cap) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_data(3, vec![0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0])
            .expect("square")
    }

    #[test]
    fn test_min_routes() {
        assert_eq!(min_routes(12, 10), 2);
        assert_eq!(min_routes(10, 10), 1);
        assert_eq!(min_routes(0, 10), 0);
        assert_eq!(min_routes(i32::MAX, 2), 1 << 30);
        assert_eq!(min_routes(i32::MAX, i32::MAX), 1);
    }

    #[test]
    fn test_validate_rejects_oversized_task() {
        let p = CarpProblem::new(vec![ServiceTask::edge(4, 1, 2, 11, 0.0)], 0, 10, matrix());
        match p.validate() {
            Err(CarpError::InfeasibleInstance { id, demand, .. }) => {
                assert_eq!(id, 4);
                assert_eq!(demand, 11);
            }
            other => panic!("expected infeasible instance, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_vertex() {
        let p = CarpProblem::new(vec![ServiceTask::arc(1, 1, 9, 1, 0.0)], 0, 10, matrix());
        assert!(matches!(
            p.validate(),
            Err(CarpError::MalformedTask { vertex: 9, .. })
        ));

        let p = CarpProblem::new(vec![], 5, 10, matrix());
        assert!(matches!(
            p.validate(),
            Err(CarpError::MalformedTask { vertex: 5, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let p = CarpProblem::new(vec![], 0, 0, matrix());
        assert!(matches!(p.validate(), Err(CarpError::InvalidCapacity(0))));
    }
}
