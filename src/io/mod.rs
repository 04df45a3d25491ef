//! Solution persistence.
//!
//! - [`write_solution`] — Serializes a solution to any writer
//! - [`save_solution`] — Writes a solution file with a fresh run id and timestamp

mod writer;

pub use writer::{save_solution, write_solution};
