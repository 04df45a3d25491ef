//! Route concatenation in the four forward/reverse orientations.
//!
//! Two depot-anchored routes `D a₁ … aₘ D` and `D b₁ … bₙ D` can be joined
//! into a single tour in four ways:
//!
//! ```text
//! ForwardForward    D a₁ … aₘ b₁ … bₙ D
//! ForwardReversed   D a₁ … aₘ bₙ … b₁ D
//! ReversedForward   D aₘ … a₁ b₁ … bₙ D
//! ReversedReversed  D aₘ … a₁ bₙ … b₁ D
//! ```
//!
//! Both the savings merge and the refusion pass evaluate every orientation
//! through [`best_merge`] and keep the one with the largest gain.

use crate::distance::DistanceMatrix;
use crate::models::Route;

/// One way of concatenating two routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// First forward, second forward.
    ForwardForward,
    /// First forward, second reversed.
    ForwardReversed,
    /// First reversed, second forward.
    ReversedForward,
    /// First reversed, second reversed.
    ReversedReversed,
}

impl Orientation {
    /// All orientations, in evaluation order.
    pub const ALL: [Orientation; 4] = [
        Orientation::ForwardForward,
        Orientation::ForwardReversed,
        Orientation::ReversedForward,
        Orientation::ReversedReversed,
    ];

    /// Builds the concatenated stop sequence.
    ///
    /// Forward parts keep the route's own depot markers at the outer ends;
    /// reversed parts are re-anchored on `depot`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_carp::constructive::Orientation;
    ///
    /// let a = [0, 1, 2, 0];
    /// let b = [0, 3, 4, 0];
    /// assert_eq!(Orientation::ForwardReversed.concatenate(&a, &b, 0), vec![0, 1, 2, 4, 3, 0]);
    /// assert_eq!(Orientation::ReversedForward.concatenate(&a, &b, 0), vec![0, 2, 1, 3, 4, 0]);
    /// ```
    pub fn concatenate(self, first: &[usize], second: &[usize], depot: usize) -> Vec<usize> {
        let a = inner(first);
        let b = inner(second);
        let mut stops = Vec::with_capacity(a.len() + b.len() + 2);

        match self {
            Orientation::ForwardForward | Orientation::ForwardReversed => {
                stops.push(first.first().copied().unwrap_or(depot));
                stops.extend_from_slice(a);
            }
            Orientation::ReversedForward | Orientation::ReversedReversed => {
                stops.push(depot);
                stops.extend(a.iter().rev());
            }
        }
        match self {
            Orientation::ForwardForward | Orientation::ReversedForward => {
                stops.extend_from_slice(b);
                stops.push(second.last().copied().unwrap_or(depot));
            }
            Orientation::ForwardReversed | Orientation::ReversedReversed => {
                stops.extend(b.iter().rev());
                stops.push(depot);
            }
        }
        stops
    }
}

/// Stops strictly between the two depot markers.
fn inner(stops: &[usize]) -> &[usize] {
    if stops.len() < 2 {
        return &[];
    }
    &stops[1..stops.len() - 1]
}

/// The winning concatenation of two routes.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeCandidate {
    /// Orientation that produced `stops`.
    pub orientation: Orientation,
    /// Concatenated stop sequence.
    pub stops: Vec<usize>,
    /// Transportation cost saved versus keeping the routes apart.
    pub gain: f64,
}

/// Returns `true` if the two routes fit one vehicle and share no task.
pub fn can_merge(first: &Route, second: &Route, capacity: i32) -> bool {
    first.demand() + second.demand() <= capacity && !first.overlaps(second)
}

/// Evaluates all four orientations and returns the one with the largest
/// gain, provided that gain reaches `min_gain`.
///
/// Gain is `cost(first) + cost(second) - cost(merged)`; service costs are
/// identical on both sides and cancel out, so only transport is compared.
/// Candidates whose ends are not the depot are skipped.
pub fn best_merge(
    first: &Route,
    second: &Route,
    depot: usize,
    distances: &DistanceMatrix,
    min_gain: f64,
) -> Option<MergeCandidate> {
    let old_cost = first.transport_cost(distances) + second.transport_cost(distances);
    let mut best: Option<MergeCandidate> = None;

    for orientation in Orientation::ALL {
        let stops = orientation.concatenate(first.stops(), second.stops(), depot);
        if stops.first() != Some(&depot) || stops.last() != Some(&depot) {
            log::warn!(
                "discarding {orientation:?} concatenation: endpoints {:?}..{:?} are not depot {depot}",
                stops.first(),
                stops.last()
            );
            continue;
        }

        let gain = old_cost - distances.path_cost(&stops);
        if gain < min_gain || gain.is_nan() {
            continue;
        }
        if best.as_ref().is_none_or(|b| gain > b.gain) {
            best = Some(MergeCandidate {
                orientation,
                stops,
                gain,
            });
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

    #[test]
    fn test_all_orientations() {
        let a = [0, 1, 2, 0];
        let b = [0, 3, 4, 0];
        assert_eq!(
            Orientation::ForwardForward.concatenate(&a, &b, 0),
            vec![0, 1, 2, 3, 4, 0]
        );
        assert_eq!(
            Orientation::ReversedReversed.concatenate(&a, &b, 0),
            vec![0, 2, 1, 4, 3, 0]
        );
    }

    #[test]
    fn test_forward_keeps_route_markers() {
        // a malformed first route leaks its start marker into the candidate
        let a = [7, 1, 0];
        let b = [0, 2, 0];
        let stops = Orientation::ForwardForward.concatenate(&a, &b, 0);
        assert_eq!(stops, vec![7, 1, 2, 0]);
    }

    #[test]
    fn test_best_merge_picks_largest_gain() {
        let dm = line_matrix(5);
        let a = Route::singleton(ServiceTask::edge(1, 2, 1, 1, 0.0), 0);
        let b = Route::singleton(ServiceTask::edge(2, 3, 4, 1, 0.0), 0);
        // a: 0 2 1 0 = 4, b: 0 3 4 0 = 8
        let best = best_merge(&a, &b, 0, &dm, 0.1).expect("merge");
        // reversing a gives 0 1 2 3 4 0 = 8
        assert_eq!(best.orientation, Orientation::ReversedForward);
        assert_eq!(best.stops, vec![0, 1, 2, 3, 4, 0]);
        assert!((best.gain - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_best_merge_respects_threshold() {
        let dm = line_matrix(5);
        let a = Route::singleton(ServiceTask::node(1, 2, 1, 0.0), 0);
        let b = Route::singleton(ServiceTask::node(2, 2, 1, 0.0), 0);
        // merged 0 2 2 2 2 0 = 4 vs 8 separately
        assert!(best_merge(&a, &b, 0, &dm, 4.0).is_some());
        assert!(best_merge(&a, &b, 0, &dm, 4.5).is_none());
        assert!(best_merge(&a, &b, 0, &dm, f64::INFINITY).is_none());
    }

    #[test]
    fn test_can_merge() {
        let a = Route::singleton(ServiceTask::node(1, 1, 6, 0.0), 0);
        let b = Route::singleton(ServiceTask::node(2, 2, 5, 0.0), 0);
        assert!(!can_merge(&a, &b, 10));
        assert!(can_merge(&a, &b, 11));
        assert!(!can_merge(&a, &a, 100));
    }
}
