//! Reallocation of small leftover routes into larger ones.
//!
//! # Algorithm
//!
//! Routes serving at most [`SMALL_ROUTE_MAX_TASKS`] tasks are taken out as
//! pending. Each pending task, in order, is offered to the remaining routes
//! (first fit). A host accepts when it has capacity headroom, does not
//! already serve the task, and appending the task's stops just before the
//! return to the depot satisfies
//!
//! ```text
//! cost(new) < cost(old) + slack · d(last(old), origin(task))
//! ```
//!
//! This is a cheap detour ceiling, not an exhaustive cheapest-insertion
//! search; `slack` is configurable (2.0 by default). Tasks of a pending
//! route that find no host are regrouped into one fallback route
//! (`depot → origins → destinations reversed → depot`), which later pending
//! tasks may use as a host. No task is ever dropped or duplicated.

use crate::distance::DistanceMatrix;
use crate::models::{Route, ServiceTask};

/// Routes with this many tasks or fewer are reallocated.
pub const SMALL_ROUTE_MAX_TASKS: usize = 2;

/// Default multiplier of the detour ceiling.
pub const DEFAULT_INSERTION_SLACK: f64 = 2.0;

fn accepts(
    host: &Route,
    task: &ServiceTask,
    capacity: i32,
    distances: &DistanceMatrix,
    slack: f64,
) -> bool {
    if host.demand() + task.demand() > capacity || host.serves(&task.key()) {
        return false;
    }
    let old_cost = host.transport_cost(distances);
    let new_cost = distances.path_cost(&host.stops_with(task));
    new_cost < old_cost + slack * distances.get(host.last_stop(), task.origin())
}

/// Moves the tasks of small routes into larger routes where cheap enough.
///
/// Returns the new route set: the larger routes (some extended in place)
/// followed by any fallback routes.
///
/// # Arguments
///
/// * `routes` — Current routes
/// * `capacity` — Vehicle capacity
/// * `distances` — Distance matrix
/// * `depot` — Depot vertex
/// * `slack` — Multiplier of the detour ceiling
///
/// # Examples
///
/// ```
/// use u_carp::models::{Route, ServiceTask};
/// use u_carp::distance::DistanceMatrix;
/// use u_carp::local_search::reallocate_small_routes;
///
/// let mut data = vec![0.0; 16];
/// for i in 0..4 {
///     for j in 0..4 {
///         data[i * 4 + j] = (i as f64 - j as f64).abs();
///     }
/// }
/// let dm = DistanceMatrix::from_data(4, data).unwrap();
///
/// let mut big = Route::singleton(ServiceTask::node(1, 1, 1, 0.0), 0);
/// big.push_task(ServiceTask::node(2, 2, 1, 0.0));
/// big.push_task(ServiceTask::node(3, 3, 1, 0.0));
/// let small = Route::singleton(ServiceTask::node(4, 2, 1, 0.0), 0);
///
/// let routes = reallocate_small_routes(vec![big, small], 10, &dm, 0, 2.0);
/// assert_eq!(routes.len(), 1);
/// assert_eq!(routes[0].len(), 4);
/// ```
pub fn reallocate_small_routes(
    routes: Vec<Route>,
    capacity: i32,
    distances: &DistanceMatrix,
    depot: usize,
    slack: f64,
) -> Vec<Route> {
    let (pending, mut hosts): (Vec<Route>, Vec<Route>) = routes
        .into_iter()
        .partition(|r| r.len() <= SMALL_ROUTE_MAX_TASKS);

    let mut moved = 0usize;
    let mut fallbacks = 0usize;

    for small in pending {
        let mut leftover = Vec::new();
        for task in small.into_clients() {
            let host = hosts
                .iter()
                .position(|h| accepts(h, &task, capacity, distances, slack));
            match host {
                Some(idx) => {
                    hosts[idx].push_task(task);
                    moved += 1;
                }
                None => leftover.push(task),
            }
        }
        if !leftover.is_empty() {
            hosts.push(Route::fallback(leftover, depot));
            fallbacks += 1;
        }
    }

    log::debug!("reallocate: moved_tasks={moved} fallback_routes={fallbacks}");
    hosts
}
