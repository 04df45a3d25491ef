//! Parsed instance data and the service task catalog.

use crate::distance::{DistanceMatrix, Network};
use crate::error::Result;
use crate::models::{CarpProblem, ServiceTask, TaskKind};

/// A vertex that requires service.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredNode {
    /// Vertex id.
    pub vertex: usize,
    /// Demand.
    pub demand: i32,
    /// Service cost.
    pub service_cost: f64,
}

/// An edge or arc that requires service.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredLink {
    /// Start vertex (either end for edges).
    pub from: usize,
    /// End vertex.
    pub to: usize,
    /// Cost of traversing the link.
    pub transport_cost: f64,
    /// Demand.
    pub demand: i32,
    /// Service cost.
    pub service_cost: f64,
}

/// A parsed arc routing instance.
///
/// # Examples
///
/// ```
/// use u_carp::instance::{Instance, RequiredNode};
///
/// let mut inst = Instance::new(10, 1);
/// inst.network.add_edge(1, 2, 4.0);
/// inst.required_nodes.push(RequiredNode { vertex: 2, demand: 3, service_cost: 1.0 });
///
/// let problem = inst.to_problem().unwrap();
/// assert_eq!(problem.tasks().len(), 1);
/// assert_eq!(problem.distances().get(1, 2), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    /// Instance name, if given.
    pub name: Option<String>,
    /// Best known objective, if given.
    pub optimal_value: Option<i64>,
    /// Vehicle capacity.
    pub capacity: i32,
    /// Depot vertex.
    pub depot: usize,
    /// Full traversable network, required links included.
    pub network: Network,
    /// Required vertices in file order.
    pub required_nodes: Vec<RequiredNode>,
    /// Required edges in file order.
    pub required_edges: Vec<RequiredLink>,
    /// Required arcs in file order.
    pub required_arcs: Vec<RequiredLink>,
}

impl Instance {
    /// Creates an instance with no network and no requirements.
    pub fn new(capacity: i32, depot: usize) -> Self {
        let mut network = Network::new();
        network.add_vertex(depot);
        Self {
            name: None,
            optimal_value: None,
            capacity,
            depot,
            network,
            required_nodes: Vec::new(),
            required_edges: Vec::new(),
            required_arcs: Vec::new(),
        }
    }

    /// Flattens the requirements into service tasks.
    ///
    /// Ids run from 1: required nodes first, then edges, then arcs.
    pub fn tasks(&self) -> Vec<ServiceTask> {
        let nodes = self
            .required_nodes
            .iter()
            .map(|n| (TaskKind::Node, n.vertex, n.vertex, n.demand, n.service_cost));
        let edges = self
            .required_edges
            .iter()
            .map(|l| (TaskKind::Edge, l.from, l.to, l.demand, l.service_cost));
        let arcs = self
            .required_arcs
            .iter()
            .map(|l| (TaskKind::Arc, l.from, l.to, l.demand, l.service_cost));

        nodes
            .chain(edges)
            .chain(arcs)
            .enumerate()
            .map(|(i, (kind, origin, destination, demand, cost))| {
                ServiceTask::new(kind, i + 1, origin, destination, demand, cost)
            })
            .collect()
    }

    /// Computes the distance matrix and assembles a validated problem.
    pub fn to_problem(&self) -> Result<CarpProblem> {
        let distances = DistanceMatrix::from_network(&self.network)?;
        let problem = CarpProblem::new(self.tasks(), self.depot, self.capacity, distances);
        problem.validate()?;
        Ok(problem)
    }
}
