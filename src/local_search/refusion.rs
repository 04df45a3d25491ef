//! Exhaustive route refusion after reallocation.
//!
//! # Algorithm
//!
//! Each round scans every unordered pair of routes, evaluates all four
//! concatenation orientations of feasible pairs (capacity and task
//! disjointness), and applies only the single best merge found. The merged
//! pair is removed and the new route appended; the next round rescans from
//! scratch. The pass ends when a round finds no merge with positive gain
//! reaching the minimum gain.
//!
//! The route set is small at this stage, so a full rescan per round stays
//! cheap and needs no priority queue bookkeeping.
//!
//! # Complexity
//!
//! O(r² · L) per round for r routes of length L; at most r - 1 rounds.

use crate::constructive::{best_merge, can_merge, MergeCandidate};
use crate::distance::DistanceMatrix;
use crate::models::Route;

/// Repeatedly applies the globally best pairwise merge until none remains.
///
/// Running it again on its own output performs no further merge.
///
/// # Arguments
///
/// * `routes` — Current routes
/// * `distances` — Distance matrix
/// * `depot` — Depot vertex
/// * `capacity` — Vehicle capacity
/// * `min_gain` — Smallest transport saving for which a merge is accepted
///
/// # Examples
///
/// ```
/// use u_carp::models::{Route, ServiceTask};
/// use u_carp::distance::DistanceMatrix;
/// use u_carp::local_search::refuse_routes;
///
/// let mut data = vec![0.0; 9];
/// for i in 0..3 {
///     for j in 0..3 {
///         data[i * 3 + j] = (i as f64 - j as f64).abs();
///     }
/// }
/// let dm = DistanceMatrix::from_data(3, data).unwrap();
/// let routes = vec![
///     Route::singleton(ServiceTask::node(1, 1, 1, 0.0), 0),
///     Route::singleton(ServiceTask::node(2, 2, 1, 0.0), 0),
/// ];
///
/// let fused = refuse_routes(routes, &dm, 0, 10, 0.1);
/// assert_eq!(fused.len(), 1);
/// assert!((fused[0].transport_cost(&dm) - 4.0).abs() < 1e-10);
/// ```
pub fn refuse_routes(
    mut routes: Vec<Route>,
    distances: &DistanceMatrix,
    depot: usize,
    capacity: i32,
    min_gain: f64,
) -> Vec<Route> {
    let mut rounds = 0usize;

    while let Some((i, j, candidate)) = best_pair(&routes, distances, depot, capacity, min_gain) {
        rounds += 1;
        let merged = Route::merged(&routes[i], &routes[j], candidate.stops);
        // j > i, so removing j first keeps i in place
        routes.remove(j);
        routes.remove(i);
        routes.push(merged);
    }

    log::debug!("refusion: merges={rounds} routes={}", routes.len());
    routes
}

/// Finds the pair with the largest positive merge gain.
fn best_pair(
    routes: &[Route],
    distances: &DistanceMatrix,
    depot: usize,
    capacity: i32,
    min_gain: f64,
) -> Option<(usize, usize, MergeCandidate)> {
    let mut best: Option<(usize, usize, MergeCandidate)> = None;
    let mut best_gain = 0.0;

    for i in 0..routes.len() {
        for j in (i + 1)..routes.len() {
            let (first, second) = (&routes[i], &routes[j]);
            if !can_merge(first, second, capacity) {
                continue;
            }
            if let Some(candidate) = best_merge(first, second, depot, distances, min_gain) {
                if candidate.gain > best_gain {
                    best_gain = candidate.gain;
                    best = Some((i, j, candidate));
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceTask;

    fn line_matrix(n: usize) -> DistanceMatrix {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = (i as f64 - j as f64).abs();
            }
        }
        DistanceMatrix::from_data(n, data).expect("square")
    }

    fn singletons(vertices: &[usize], demand: i32) -> Vec<Route> {
        vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| Route::singleton(ServiceTask::node(i + 1, v, demand, 0.0), 0))
            .collect()
    }

    #[test]
    fn test_merges_into_single_route() {
        let dm = line_matrix(5);
        let fused = refuse_routes(singletons(&[1, 2, 3, 4], 1), &dm, 0, 10, 0.1);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].len(), 4);
        assert!((fused[0].transport_cost(&dm) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_picks_globally_best_pair_first() {
        let dm = line_matrix(5);
        // capacity allows one pair only; (3, 4) saves 6, more than any other pair
        let fused = refuse_routes(singletons(&[1, 3, 4], 5), &dm, 0, 10, 0.1);
        assert_eq!(fused.len(), 2);
        let pair = fused.last().expect("merged route");
        let ids: Vec<usize> = pair.clients().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_respects_capacity() {
        let dm = line_matrix(5);
        let fused = refuse_routes(singletons(&[1, 2, 3], 6), &dm, 0, 10, 0.1);
        assert_eq!(fused.len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let dm = line_matrix(6);
        let once = refuse_routes(singletons(&[1, 2, 3, 4, 5], 3), &dm, 0, 10, 0.1);
        let twice = refuse_routes(once.clone(), &dm, 0, 10, 0.1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_threshold_blocks_small_gains() {
        let dm = line_matrix(3);
        let routes = singletons(&[1, 2], 1);
        // merging saves exactly 2
        assert_eq!(refuse_routes(routes.clone(), &dm, 0, 10, 2.5).len(), 2);
        assert_eq!(refuse_routes(routes, &dm, 0, 10, 2.0).len(), 1);
    }
}
