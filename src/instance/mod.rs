//! Problem instances: the `.dat` reader and the service task catalog.
//!
//! - [`parse_instance`] / [`read_instance`] — Reads the instance text format
//! - [`Instance::tasks`] — Flattens required nodes, edges and arcs into tasks
//! - [`Instance::to_problem`] — Builds distances and assembles a [`CarpProblem`](crate::models::CarpProblem)

mod catalog;
mod reader;

pub use catalog::{Instance, RequiredLink, RequiredNode};
pub use reader::{parse_instance, read_instance};
