//! Service task types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of network element a task requires service on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// A required vertex.
    Node,
    /// A required undirected edge.
    Edge,
    /// A required directed arc.
    Arc,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            TaskKind::Node => "N",
            TaskKind::Edge => "E",
            TaskKind::Arc => "A",
        };
        f.write_str(tag)
    }
}

/// Identity of a service task: `(kind, id)` is unique across an instance.
pub type TaskRef = (TaskKind, usize);

/// A required unit of work with its own demand and service cost.
///
/// For node tasks `origin == destination`.
///
/// # Examples
///
/// ```
/// use u_carp::models::{ServiceTask, TaskKind};
///
/// let t = ServiceTask::edge(3, 4, 7, 2, 5.0);
/// assert_eq!(t.kind(), TaskKind::Edge);
/// assert_eq!(t.key(), (TaskKind::Edge, 3));
/// assert_eq!((t.origin(), t.destination()), (4, 7));
///
/// let n = ServiceTask::node(1, 9, 1, 0.0);
/// assert_eq!(n.origin(), n.destination());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTask {
    kind: TaskKind,
    id: usize,
    origin: usize,
    destination: usize,
    demand: i32,
    service_cost: f64,
}

impl ServiceTask {
    /// Creates a task of the given kind.
    pub fn new(
        kind: TaskKind,
        id: usize,
        origin: usize,
        destination: usize,
        demand: i32,
        service_cost: f64,
    ) -> Self {
        Self {
            kind,
            id,
            origin,
            destination,
            demand,
            service_cost,
        }
    }

    /// Creates a required-vertex task.
    pub fn node(id: usize, vertex: usize, demand: i32, service_cost: f64) -> Self {
        Self::new(TaskKind::Node, id, vertex, vertex, demand, service_cost)
    }

    /// Creates a required-edge task.
    pub fn edge(id: usize, u: usize, v: usize, demand: i32, service_cost: f64) -> Self {
        Self::new(TaskKind::Edge, id, u, v, demand, service_cost)
    }

    /// Creates a required-arc task.
    pub fn arc(id: usize, from: usize, to: usize, demand: i32, service_cost: f64) -> Self {
        Self::new(TaskKind::Arc, id, from, to, demand, service_cost)
    }

    /// Task kind.
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Task id (unique positive integer).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Identity key used for coverage bookkeeping.
    pub fn key(&self) -> TaskRef {
        (self.kind, self.id)
    }

    /// Vertex where service starts.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Vertex where service ends.
    pub fn destination(&self) -> usize {
        self.destination
    }

    /// Demand consumed from vehicle capacity.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Fixed cost paid for servicing this task.
    pub fn service_cost(&self) -> f64 {
        self.service_cost
    }
}
