//! Randomized-restart (GRASP) driver.
//!
//! - [`GraspConfig`] — Restart count, merge threshold, seed, parallelism
//! - [`GraspSolver`] — Runs the construction and improvement pipeline per restart
//! - [`run_iteration`] — One pipeline pass over a given task order

mod config;
mod driver;

pub use config::GraspConfig;
pub use driver::{run_iteration, GraspResult, GraspSolver};
