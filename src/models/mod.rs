//! Domain model types for arc routing problems.
//!
//! Provides the core abstractions: service tasks on nodes, edges and arcs,
//! routes as depot-anchored stop sequences with their served-task sets,
//! solutions, and the problem instance that ties everything together.

mod problem;
mod route;
mod solution;
mod task;

pub(crate) use problem::min_routes;
pub use problem::CarpProblem;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
pub use task::{ServiceTask, TaskKind, TaskRef};
