//! Intra-route 2-opt improvement on depot-anchored stop sequences.
//!
//! # Algorithm
//!
//! A sweep tries every cut pair `(i, j)` with `1 ≤ i`, `i + 2 ≤ j ≤ len - 2`
//! and builds the candidate with the segment `[i, j)` reversed:
//!
//! ```text
//! stops[..i] + reverse(stops[i..j]) + stops[j..]
//! ```
//!
//! All candidates of a sweep are derived from the sequence the sweep started
//! with; the cheapest one is adopted only after the sweep completes
//! (best-improvement). Sweeps repeat until one finds nothing cheaper or the
//! iteration cap is hit. Depot markers never move.
//!
//! Distances may be asymmetric, so every candidate is priced in full rather
//! than through the classic four-edge delta.
//!
//! # Complexity
//!
//! O(n³) per sweep: O(n²) candidates, each priced in O(n).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::models::Route;

const EPSILON: f64 = 1e-10;

/// Applies best-improvement 2-opt to a stop sequence.
///
/// Returns the improved sequence and its transportation cost. The result is
/// never more expensive than the input.
///
/// # Arguments
///
/// * `stops` — Full stop sequence, depot at both ends
/// * `distances` — Distance matrix
/// * `max_iterations` — Cap on the number of sweeps
///
/// # Examples
///
/// ```
/// use u_carp::distance::DistanceMatrix;
/// use u_carp::local_search::two_opt_improve;
///
/// let mut data = vec![0.0; 25];
/// for i in 0..5 {
///     for j in 0..5 {
///         data[i * 5 + j] = (i as f64 - j as f64).abs();
///     }
/// }
/// let dm = DistanceMatrix::from_data(5, data).unwrap();
///
/// // 0 → 3 → 2 → 1 → 4 → 4 → 0 zig-zags along the line
/// let (improved, cost) = two_opt_improve(&[0, 3, 2, 1, 4, 4, 0], &dm, 20);
/// assert_eq!(improved, vec![0, 1, 2, 3, 4, 4, 0]);
/// assert!((cost - 8.0).abs() < 1e-10);
/// ```
pub fn two_opt_improve(
    stops: &[usize],
    distances: &DistanceMatrix,
    max_iterations: usize,
) -> (Vec<usize>, f64) {
    let mut current = stops.to_vec();
    let mut current_cost = distances.path_cost(&current);
    let n = current.len();
    if n < 5 {
        return (current, current_cost);
    }

    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;
        let mut best: Option<(Vec<usize>, f64)> = None;
        let mut best_cost = current_cost;

        for i in 1..n - 2 {
            for j in (i + 2)..n - 1 {
                let mut candidate = current.clone();
                candidate[i..j].reverse();
                let cost = distances.path_cost(&candidate);
                if cost + EPSILON < best_cost {
                    best_cost = cost;
                    best = Some((candidate, cost));
                }
            }
        }

        match best {
            Some((candidate, cost)) => {
                current = candidate;
                current_cost = cost;
            }
            None => break,
        }
    }

    (current, current_cost)
}

/// Applies [`two_opt_improve`] to every route in place.
///
/// Only stop order changes; served tasks and demand are untouched.
/// Returns the number of routes whose sequence changed.
pub fn two_opt_routes(
    routes: &mut [Route],
    distances: &DistanceMatrix,
    max_iterations: usize,
) -> usize {
    let mut changed = 0;
    for route in routes.iter_mut() {
        let (improved, _) = two_opt_improve(route.stops(), distances, max_iterations);
        if improved.as_slice() != route.stops() {
            route.set_stops(improved);
            changed += 1;
        }
    }
    changed
}
