//! Transportation network topology.

use std::collections::BTreeSet;

/// Vertices plus weighted undirected edges and directed arcs.
///
/// Vertex ids are plain integers; the matrix built from a network has one
/// slot per id up to the largest one seen.
#[derive(Debug, Clone, Default)]
pub struct Network {
    vertices: BTreeSet<usize>,
    edges: Vec<(usize, usize, f64)>,
    arcs: Vec<(usize, usize, f64)>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an isolated vertex.
    pub fn add_vertex(&mut self, v: usize) {
        self.vertices.insert(v);
    }

    /// Adds an undirected edge.
    pub fn add_edge(&mut self, u: usize, v: usize, cost: f64) {
        self.vertices.insert(u);
        self.vertices.insert(v);
        self.edges.push((u, v, cost));
    }

    /// Adds a directed arc `from → to`.
    pub fn add_arc(&mut self, from: usize, to: usize, cost: f64) {
        self.vertices.insert(from);
        self.vertices.insert(to);
        self.arcs.push((from, to, cost));
    }

    /// Known vertices in ascending order.
    pub fn vertices(&self) -> &BTreeSet<usize> {
        &self.vertices
    }

    /// Undirected edges as `(u, v, cost)`.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Directed arcs as `(from, to, cost)`.
    pub fn arcs(&self) -> &[(usize, usize, f64)] {
        &self.arcs
    }

    /// Number of matrix slots needed: largest vertex id plus one.
    pub fn size(&self) -> usize {
        self.vertices.last().map_or(0, |&v| v + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_tracks_largest_id() {
        let mut net = Network::new();
        assert_eq!(net.size(), 0);
        net.add_edge(1, 4, 2.0);
        net.add_vertex(9);
        assert_eq!(net.size(), 10);
        assert_eq!(net.vertices().len(), 3);
        assert_eq!(net.edges().len(), 1);
        assert!(net.arcs().is_empty());
    }
}
