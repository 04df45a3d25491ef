//! Clarke-Wright savings merge with a lazily pruned priority queue.
//!
//! # Algorithm
//!
//! Every task starts on its own route (`depot → origin → destination →
//! depot`). For an ordered pair of routes the saving of running the end of
//! `i` straight into the start of `j` is
//!
//! ```text
//! s(i, j) = d(last(i), D) + d(D, first(j)) - d(last(i), first(j))
//! ```
//!
//! Candidates are popped in decreasing order of savings. A popped pair is
//! merged if both routes are still active, fit one vehicle, share no task,
//! and one of the four concatenation orientations gains at least the
//! minimum gain. Merged routes are retired and a new route takes their
//! place in the arena; queue entries that mention retired routes are left
//! in place and dropped when popped.
//!
//! The loop stops once the number of active routes reaches the fleet lower
//! bound `ceil(total_demand / capacity)` or the queue runs dry.
//!
//! # Complexity
//!
//! O(n² log n) pushes for the initial pairs, plus O(n log n) per merge.
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::distance::DistanceMatrix;
use crate::models::{min_routes, Route, ServiceTask};

use super::orientation::{best_merge, can_merge};

/// A savings value for joining the end of route `first` to the start of
/// route `second`.
#[derive(Debug, Clone, Copy)]
struct Saving {
    value: f64,
    first: usize,
    second: usize,
}

impl PartialEq for Saving {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Saving {}

impl PartialOrd for Saving {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Saving {
    // Largest saving first; ties go to the lower route ids.
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| other.first.cmp(&self.first))
            .then_with(|| other.second.cmp(&self.second))
    }
}

impl Saving {
    fn between(
        routes: &[Route],
        first: usize,
        second: usize,
        depot: usize,
        distances: &DistanceMatrix,
    ) -> Self {
        let end = routes[first].last_stop();
        let start = routes[second].first_stop();
        let value =
            distances.get(end, depot) + distances.get(depot, start) - distances.get(end, start);
        Self {
            value: if value.is_nan() { f64::NEG_INFINITY } else { value },
            first,
            second,
        }
    }
}

/// Routes indexed by id. Retired routes stay in place but are inactive.
#[derive(Debug)]
struct RouteArena {
    routes: Vec<Route>,
    active: Vec<bool>,
    num_active: usize,
}

impl RouteArena {
    fn new(routes: Vec<Route>) -> Self {
        let n = routes.len();
        Self {
            routes,
            active: vec![true; n],
            num_active: n,
        }
    }

    fn is_active(&self, id: usize) -> bool {
        self.active[id]
    }

    fn retire(&mut self, id: usize) {
        if self.active[id] {
            self.active[id] = false;
            self.num_active -= 1;
        }
    }

    fn push(&mut self, route: Route) -> usize {
        self.routes.push(route);
        self.active.push(true);
        self.num_active += 1;
        self.routes.len() - 1
    }

    fn active_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(id, &alive)| alive.then_some(id))
    }

    fn into_active(self) -> Vec<Route> {
        self.routes
            .into_iter()
            .zip(self.active)
            .filter_map(|(route, alive)| alive.then_some(route))
            .collect()
    }
}

/// Creates one route per task, in task order.
///
/// # Examples
///
/// ```
/// use u_carp::models::ServiceTask;
/// use u_carp::constructive::initial_routes;
///
/// let tasks = vec![ServiceTask::node(1, 4, 1, 0.0), ServiceTask::arc(2, 5, 6, 1, 0.0)];
/// let routes = initial_routes(&tasks, 0);
/// assert_eq!(routes[0].stops(), &[0, 4, 4, 0]);
/// assert_eq!(routes[1].stops(), &[0, 5, 6, 0]);
/// ```
pub fn initial_routes(tasks: &[ServiceTask], depot: usize) -> Vec<Route> {
    tasks
        .iter()
        .cloned()
        .map(|t| Route::singleton(t, depot))
        .collect()
}

/// Merges routes greedily in decreasing order of savings.
///
/// Never forces a merge: the result is always a feasible partition of the
/// input routes' tasks, possibly left unchanged. Returns the active routes
/// in order of creation.
///
/// # Arguments
///
/// * `routes` — Starting routes (normally [`initial_routes`])
/// * `distances` — Shortest-path distance matrix
/// * `depot` — Depot vertex
/// * `capacity` — Vehicle capacity
/// * `min_gain` — Smallest transport saving for which a merge is accepted
///
/// # Examples
///
/// ```
/// use u_carp::models::ServiceTask;
/// use u_carp::distance::DistanceMatrix;
/// use u_carp::constructive::{initial_routes, savings_merge};
///
/// // depot 0, vertices 1..=3 on a line
/// let mut data = vec![0.0; 16];
/// for i in 0..4 {
///     for j in 0..4 {
///         data[i * 4 + j] = (i as f64 - j as f64).abs();
///     }
/// }
/// let dm = DistanceMatrix::from_data(4, data).unwrap();
/// let tasks: Vec<_> = (1..=3).map(|v| ServiceTask::node(v, v, 10, 0.0)).collect();
///
/// let routes = savings_merge(initial_routes(&tasks, 0), &dm, 0, 30, 0.1);
/// assert_eq!(routes.len(), 1);
/// assert!((routes[0].transport_cost(&dm) - 6.0).abs() < 1e-10);
/// ```
pub fn savings_merge(
    routes: Vec<Route>,
    distances: &DistanceMatrix,
    depot: usize,
    capacity: i32,
    min_gain: f64,
) -> Vec<Route> {
    let total_demand: i32 = routes.iter().map(|r| r.demand()).sum();
    let target = min_routes(total_demand, capacity);
    let mut arena = RouteArena::new(routes);

    let n = arena.routes.len();
    let mut queue = BinaryHeap::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            queue.push(Saving::between(&arena.routes, i, j, depot, distances));
        }
    }

    let mut merges = 0usize;
    let mut stale = 0usize;

    while arena.num_active > target {
        let Some(candidate) = queue.pop() else {
            break;
        };
        let (i, j) = (candidate.first, candidate.second);
        if !arena.is_active(i) || !arena.is_active(j) {
            stale += 1;
            continue;
        }

        let (first, second) = (&arena.routes[i], &arena.routes[j]);
        if first.overlaps(second) {
            log::warn!("savings: routes {i} and {j} serve a common task; pair skipped");
            continue;
        }
        if !can_merge(first, second, capacity) {
            continue;
        }
        let Some(best) = best_merge(first, second, depot, distances, min_gain) else {
            continue;
        };

        let merged = Route::merged(first, second, best.stops);
        arena.retire(i);
        arena.retire(j);
        let id = arena.push(merged);
        merges += 1;

        let fresh: Vec<Saving> = arena
            .active_ids()
            .filter(|&k| k != id)
            .flat_map(|k| {
                [
                    Saving::between(&arena.routes, id, k, depot, distances),
                    Saving::between(&arena.routes, k, id, depot, distances),
                ]
            })
            .collect();
        queue.extend(fresh);
    }

    log::debug!(
        "savings: merges={merges} stale_entries={stale} routes={} target={target}",
        arena.num_active
    );
    arena.into_active()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Depot 0 and three nodes: 1 and 2 are close together, 3 is far from both.
    fn scenario_matrix() -> DistanceMatrix {
        #[rustfmt::skip]
        let data = vec![
            0.0, 1.0, 1.0, 1.0,
            1.0, 0.0, 1.0, 5.0,
            1.0, 1.0, 0.0, 5.0,
            1.0, 5.0, 5.0, 0.0,
        ];
        DistanceMatrix::from_data(4, data).expect("square")
    }

    fn scenario_tasks() -> Vec<ServiceTask> {
        (1..=3).map(|v| ServiceTask::node(v, v, 4, 0.0)).collect()
    }

    #[test]
    fn test_saving_ordering() {
        let hi = Saving {
            value: 3.0,
            first: 5,
            second: 6,
        };
        let lo = Saving {
            value: 1.0,
            first: 0,
            second: 1,
        };
        let tie = Saving {
            value: 3.0,
            first: 1,
            second: 9,
        };
        let mut heap = BinaryHeap::from(vec![lo, hi, tie]);
        assert_eq!(heap.pop().map(|s| s.first), Some(1));
        assert_eq!(heap.pop().map(|s| s.first), Some(5));
        assert_eq!(heap.pop().map(|s| s.first), Some(0));
    }

    #[test]
    fn test_merges_close_pair_and_respects_capacity() {
        let dm = scenario_matrix();
        let routes = savings_merge(initial_routes(&scenario_tasks(), 0), &dm, 0, 10, 0.1);
        assert_eq!(routes.len(), 2);

        let pair = routes.iter().find(|r| r.len() == 2).expect("merged pair");
        let ids: Vec<usize> = pair.clients().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(pair.demand(), 8);
        assert!(routes.iter().all(|r| r.demand() <= 10));
    }

    #[test]
    fn test_infinite_threshold_keeps_singletons() {
        let dm = scenario_matrix();
        let initial = initial_routes(&scenario_tasks(), 0);
        let routes = savings_merge(initial.clone(), &dm, 0, 100, f64::INFINITY);
        assert_eq!(routes, initial);
    }

    #[test]
    fn test_rejects_losing_merge() {
        // one vehicle could carry everything, but joining 3 never gains
        let dm = scenario_matrix();
        let routes = savings_merge(initial_routes(&scenario_tasks(), 0), &dm, 0, 100, 0.1);
        assert_eq!(routes.len(), 2);
        let served: usize = routes.iter().map(|r| r.len()).sum();
        assert_eq!(served, 3);
    }

    #[test]
    fn test_line_merges_into_one() {
        let n = 5;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = (i as f64 - j as f64).abs();
            }
        }
        let dm = DistanceMatrix::from_data(n, data).expect("square");
        let tasks: Vec<_> = (1..n).map(|v| ServiceTask::node(v, v, 1, 0.0)).collect();
        let routes = savings_merge(initial_routes(&tasks, 0), &dm, 0, 100, 0.1);
        assert_eq!(routes.len(), 1);
        assert!((routes[0].transport_cost(&dm) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_input() {
        let dm = scenario_matrix();
        assert!(savings_merge(Vec::new(), &dm, 0, 10, 0.1).is_empty());
    }
}
