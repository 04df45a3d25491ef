//! Improvement passes applied after construction.
//!
//! - [`two_opt`] — Intra-route best-improvement 2-opt on stop sequences
//! - [`reallocate`] — Moves tasks of small routes into larger ones
//! - [`refusion`] — Exhaustive global-best pairwise route merging

mod reallocate;
mod refusion;
mod two_opt;

pub use reallocate::{reallocate_small_routes, DEFAULT_INSERTION_SLACK, SMALL_ROUTE_MAX_TASKS};
pub use refusion::refuse_routes;
pub use two_opt::{two_opt_improve, two_opt_routes};
