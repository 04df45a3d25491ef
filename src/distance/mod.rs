//! Network topology and shortest-path distances.
//!
//! Provides the network description and the dense distance matrix that the
//! routing passes consult as their distance oracle.

mod matrix;
mod network;

pub use matrix::DistanceMatrix;
pub use network::Network;
