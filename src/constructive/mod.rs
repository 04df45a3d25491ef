//! Route construction for arc routing.
//!
//! - [`initial_routes`] — One depot-anchored route per service task
//! - [`savings_merge`] — Clarke-Wright savings merge over a lazily pruned heap (1964), O(n² log n)
//! - [`best_merge`] — Four-orientation concatenation shared with the refusion pass

mod orientation;
mod savings;

pub use orientation::{best_merge, can_merge, MergeCandidate, Orientation};
pub use savings::{initial_routes, savings_merge};
