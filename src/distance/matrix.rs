//! Dense all-pairs shortest-path matrix.

use crate::error::{CarpError, Result};

use super::Network;

/// A dense n×n distance matrix stored in row-major order, indexed directly
/// by vertex id.
///
/// Distances may be asymmetric (arcs are one-directional) and unreachable
/// pairs hold `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use u_carp::distance::{DistanceMatrix, Network};
///
/// let mut net = Network::new();
/// net.add_edge(1, 2, 3.0);
/// net.add_arc(2, 3, 1.0);
/// let dm = DistanceMatrix::from_network(&net).unwrap();
/// assert_eq!(dm.get(1, 3), 4.0);
/// assert_eq!(dm.get(3, 1), f64::INFINITY);
/// assert_eq!(dm.size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    ///
    /// Returns `None` if `size * size` overflows.
    pub fn new(size: usize) -> Option<Self> {
        let cells = size.checked_mul(size)?;
        Some(Self {
            data: vec![0.0; cells],
            size,
        })
    }

    /// Creates a matrix where every pair is unreachable except `v → v`.
    ///
    /// Returns `None` if `size * size` overflows.
    pub fn unreachable(size: usize) -> Option<Self> {
        let cells = size.checked_mul(size)?;
        let mut dm = Self {
            data: vec![f64::INFINITY; cells],
            size,
        };
        for v in 0..size {
            dm.set(v, v, 0.0);
        }
        Some(dm)
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if size.checked_mul(size) != Some(data.len()) {
            return None;
        }
        Some(Self { data, size })
    }

    /// Computes shortest-path distances over a network (Floyd–Warshall).
    ///
    /// Undirected edges are traversable both ways, arcs only forward.
    /// Parallel links keep the cheapest cost. Fails with
    /// [`CarpError::NetworkTooLarge`] when the vertex ids are too large to
    /// index a dense matrix.
    pub fn from_network(network: &Network) -> Result<Self> {
        let n = network.size();
        let mut dm = Self::unreachable(n).ok_or(CarpError::NetworkTooLarge { size: n })?;

        for &(u, v, cost) in network.edges() {
            dm.relax(u, v, cost);
            dm.relax(v, u, cost);
        }
        for &(u, v, cost) in network.arcs() {
            dm.relax(u, v, cost);
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = dm.get(i, k);
                if d_ik == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let through = d_ik + dm.get(k, j);
                    if through < dm.get(i, j) {
                        dm.set(i, j, through);
                    }
                }
            }
        }

        if !dm.is_symmetric(1e-9) {
            log::debug!("distance matrix over {n} vertex slots is asymmetric");
        }
        Ok(dm)
    }

    fn relax(&mut self, from: usize, to: usize, cost: f64) {
        if cost < self.get(from, to) {
            self.set(from, to, cost);
        }
    }

    /// Returns the distance from vertex `from` to vertex `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from vertex `from` to vertex `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of vertex slots in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `vertex` indexes into this matrix.
    pub fn contains(&self, vertex: usize) -> bool {
        vertex < self.size
    }

    /// Sum of consecutive distances along `stops`.
    pub fn path_cost(&self, stops: &[usize]) -> f64 {
        stops.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3).expect("small");
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_unreachable() {
        let dm = DistanceMatrix::unreachable(2).expect("small");
        assert_eq!(dm.get(0, 0), 0.0);
        assert_eq!(dm.get(0, 1), f64::INFINITY);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_floyd_warshall_shortcut() {
        let mut net = Network::new();
        net.add_edge(0, 1, 10.0);
        net.add_edge(0, 2, 2.0);
        net.add_edge(2, 1, 3.0);
        let dm = DistanceMatrix::from_network(&net).expect("small network");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_floyd_warshall_arcs_are_directed() {
        let mut net = Network::new();
        net.add_arc(0, 1, 1.0);
        net.add_arc(1, 2, 1.0);
        net.add_arc(2, 0, 1.0);
        let dm = DistanceMatrix::from_network(&net).expect("small network");
        assert_eq!(dm.get(0, 2), 2.0);
        assert_eq!(dm.get(2, 0), 1.0);
        assert_eq!(dm.get(1, 0), 2.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_parallel_links_keep_cheapest() {
        let mut net = Network::new();
        net.add_edge(0, 1, 7.0);
        net.add_arc(0, 1, 2.0);
        let dm = DistanceMatrix::from_network(&net).expect("small network");
        assert_eq!(dm.get(0, 1), 2.0);
        assert_eq!(dm.get(1, 0), 7.0);
    }

    #[test]
    fn test_path_cost() {
        let mut net = Network::new();
        net.add_edge(0, 1, 1.0);
        net.add_edge(1, 2, 1.0);
        let dm = DistanceMatrix::from_network(&net).expect("small network");
        assert_eq!(dm.path_cost(&[0, 1, 2, 0]), 4.0);
        assert_eq!(dm.path_cost(&[0]), 0.0);
        assert_eq!(dm.path_cost(&[]), 0.0);
    }

    #[test]
    fn test_oversized_matrix_is_refused() {
        assert!(DistanceMatrix::new(usize::MAX).is_none());
        assert!(DistanceMatrix::unreachable(usize::MAX / 2).is_none());
        assert!(DistanceMatrix::from_data(usize::MAX, Vec::new()).is_none());

        let mut net = Network::new();
        net.add_vertex(usize::MAX - 1);
        let err = DistanceMatrix::from_network(&net).expect_err("cannot index");
        assert!(matches!(err, CarpError::NetworkTooLarge { size } if size == usize::MAX));
    }

    #[test]
    fn test_contains() {
        let dm = DistanceMatrix::new(3).expect("small");
        assert!(dm.contains(2));
        assert!(!dm.contains(3));
    }
}
