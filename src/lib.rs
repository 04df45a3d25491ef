//! # u-carp
//!
//! Capacitated arc routing with mixed node, edge and arc service tasks:
//! instance reading, shortest-path distances, savings-based construction,
//! local improvement, and a randomized-restart (GRASP) driver.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (ServiceTask, Route, Solution, CarpProblem)
//! - [`distance`] — Road network and all-pairs shortest-path matrix
//! - [`instance`] — `.dat` instance reader and task catalog
//! - [`evaluation`] — Solution cost and feasibility checking
//! - [`constructive`] — Singleton initialization and Clarke-Wright savings merge
//! - [`local_search`] — 2-opt, small-route reallocation, route refusion
//! - [`grasp`] — Randomized-restart driver
//! - [`io`] — Solution file writer
//! - [`error`] — Crate error type

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod grasp;
pub mod instance;
pub mod io;
pub mod local_search;
pub mod models;

pub use error::{CarpError, Result};
