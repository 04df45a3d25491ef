//! Route type.

use std::collections::BTreeSet;

use crate::distance::DistanceMatrix;

use super::{ServiceTask, TaskRef};

/// A depot-to-depot tour serving a set of tasks.
///
/// `stops` always begins and ends at the depot. Each served task
/// contributes its origin and destination stops; `demand` equals the sum of
/// the clients' demands and `served` holds exactly the clients' keys.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Route, ServiceTask};
/// use u_carp::distance::DistanceMatrix;
///
/// let task = ServiceTask::edge(1, 1, 2, 3, 4.0);
/// let route = Route::singleton(task, 0);
/// assert_eq!(route.stops(), &[0, 1, 2, 0]);
/// assert_eq!(route.demand(), 3);
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 2.0,
///     1.0, 0.0, 1.0,
///     2.0, 1.0, 0.0,
/// ]).unwrap();
/// // transport 1 + 1 + 2, service 4
/// assert!((route.cost(&dm) - 8.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    stops: Vec<usize>,
    served: BTreeSet<TaskRef>,
    demand: i32,
    clients: Vec<ServiceTask>,
}

impl Route {
    /// Creates the initial route `depot → origin → destination → depot`.
    pub fn singleton(task: ServiceTask, depot: usize) -> Self {
        let stops = vec![depot, task.origin(), task.destination(), depot];
        let mut served = BTreeSet::new();
        served.insert(task.key());
        Self {
            stops,
            served,
            demand: task.demand(),
            clients: vec![task],
        }
    }

    /// Combines two routes under a new stop sequence.
    ///
    /// Clients of `first` precede those of `second`.
    pub fn merged(first: &Route, second: &Route, stops: Vec<usize>) -> Self {
        let mut clients = Vec::with_capacity(first.clients.len() + second.clients.len());
        clients.extend(first.clients.iter().cloned());
        clients.extend(second.clients.iter().cloned());
        Self {
            stops,
            served: first.served.union(&second.served).copied().collect(),
            demand: first.demand + second.demand,
            clients,
        }
    }

    /// Builds a route for leftover tasks: depot, every origin in order,
    /// every destination in reverse order, depot.
    pub fn fallback(tasks: Vec<ServiceTask>, depot: usize) -> Self {
        let mut stops = Vec::with_capacity(tasks.len() * 2 + 2);
        stops.push(depot);
        stops.extend(tasks.iter().map(|t| t.origin()));
        stops.extend(tasks.iter().rev().map(|t| t.destination()));
        stops.push(depot);
        Self {
            stops,
            served: tasks.iter().map(|t| t.key()).collect(),
            demand: tasks.iter().map(|t| t.demand()).sum(),
            clients: tasks,
        }
    }

    /// Appends a task's stops right before the final return to the depot.
    pub fn push_task(&mut self, task: ServiceTask) {
        let end = self.stops.len() - 1;
        self.stops.insert(end, task.destination());
        self.stops.insert(end, task.origin());
        self.demand += task.demand();
        self.served.insert(task.key());
        self.clients.push(task);
    }

    /// The stop sequence the route would have after [`push_task`](Self::push_task).
    pub fn stops_with(&self, task: &ServiceTask) -> Vec<usize> {
        let end = self.stops.len() - 1;
        let mut stops = Vec::with_capacity(self.stops.len() + 2);
        stops.extend_from_slice(&self.stops[..end]);
        stops.push(task.origin());
        stops.push(task.destination());
        stops.push(self.stops[end]);
        stops
    }

    /// Ordered stops, depot at both ends.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Replaces the stop sequence; membership is untouched.
    pub(crate) fn set_stops(&mut self, stops: Vec<usize>) {
        self.stops = stops;
    }

    /// Stop right after the leaving depot marker.
    pub fn first_stop(&self) -> usize {
        self.stops[1]
    }

    /// Stop right before the returning depot marker.
    pub fn last_stop(&self) -> usize {
        self.stops[self.stops.len() - 2]
    }

    /// Keys of the tasks this route serves.
    pub fn served(&self) -> &BTreeSet<TaskRef> {
        &self.served
    }

    /// Returns `true` if this route serves the given task.
    pub fn serves(&self, key: &TaskRef) -> bool {
        self.served.contains(key)
    }

    /// Returns `true` if both routes serve a common task.
    pub fn overlaps(&self, other: &Route) -> bool {
        !self.served.is_disjoint(&other.served)
    }

    /// Total demand served by this route.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Tasks in the order they were added to the route.
    pub fn clients(&self) -> &[ServiceTask] {
        &self.clients
    }

    /// Consumes the route, returning its tasks.
    pub fn into_clients(self) -> Vec<ServiceTask> {
        self.clients
    }

    /// Number of tasks served.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` if the route serves no task.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Transportation cost of traversing the stops.
    pub fn transport_cost(&self, distances: &DistanceMatrix) -> f64 {
        distances.path_cost(&self.stops)
    }

    /// Sum of the clients' service costs.
    pub fn service_cost(&self) -> f64 {
        self.clients.iter().map(|c| c.service_cost()).sum()
    }

    /// Transportation plus service cost.
    pub fn cost(&self, distances: &DistanceMatrix) -> f64 {
        self.transport_cost(distances) + self.service_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskKind;

    fn line_matrix() -> DistanceMatrix {
        // vertices 0..4 on a line, unit spacing
        let n = 5;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = (i as f64 - j as f64).abs();
            }
        }
        DistanceMatrix::from_data(n, data).expect("square")
    }

    #[test]
    fn test_singleton_node() {
        let r = Route::singleton(ServiceTask::node(1, 3, 2, 1.5), 0);
        assert_eq!(r.stops(), &[0, 3, 3, 0]);
        assert_eq!(r.first_stop(), 3);
        assert_eq!(r.last_stop(), 3);
        assert_eq!(r.len(), 1);
        assert!(r.serves(&(TaskKind::Node, 1)));
        assert!((r.cost(&line_matrix()) - 7.5).abs() < 1e-10);
    }

    #[test]
    fn test_merged_unions_everything() {
        let a = Route::singleton(ServiceTask::node(1, 1, 2, 1.0), 0);
        let b = Route::singleton(ServiceTask::edge(2, 2, 3, 5, 2.0), 0);
        let m = Route::merged(&a, &b, vec![0, 1, 1, 2, 3, 0]);
        assert_eq!(m.demand(), 7);
        assert_eq!(m.served().len(), 2);
        assert_eq!(m.clients()[0].id(), 1);
        assert_eq!(m.clients()[1].id(), 2);
        assert!((m.service_cost() - 3.0).abs() < 1e-10);
        assert!(m.overlaps(&a));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_push_task_keeps_depot_last() {
        let mut r = Route::singleton(ServiceTask::node(1, 1, 2, 0.0), 0);
        let t = ServiceTask::arc(2, 3, 4, 1, 0.0);
        let preview = r.stops_with(&t);
        r.push_task(t);
        assert_eq!(r.stops(), &[0, 1, 1, 3, 4, 0]);
        assert_eq!(r.stops(), preview.as_slice());
        assert_eq!(r.demand(), 3);
        assert!(r.serves(&(TaskKind::Arc, 2)));
    }

    #[test]
    fn test_fallback_layout() {
        let tasks = vec![
            ServiceTask::edge(1, 1, 2, 1, 0.0),
            ServiceTask::edge(2, 3, 4, 1, 0.0),
        ];
        let r = Route::fallback(tasks, 0);
        assert_eq!(r.stops(), &[0, 1, 3, 4, 2, 0]);
        assert_eq!(r.demand(), 2);
        assert_eq!(r.served().len(), 2);
    }
}
