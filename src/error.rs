//! Error types for arc routing.

use thiserror::Error;

use crate::models::TaskKind;

/// Result type alias for u-carp operations.
pub type Result<T> = std::result::Result<T, CarpError>;

/// Errors raised at the crate boundary or by a failed internal check.
#[derive(Debug, Error)]
pub enum CarpError {
    /// A single task demands more than one vehicle can carry.
    #[error("task {kind}{id} demands {demand}, exceeding vehicle capacity {capacity}")]
    InfeasibleInstance {
        /// Task kind.
        kind: TaskKind,
        /// Task id.
        id: usize,
        /// Demand of the task.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },

    /// Vehicle capacity must be strictly positive.
    #[error("vehicle capacity must be positive, got {0}")]
    InvalidCapacity(i32),

    /// A task (or the depot) references a vertex outside the distance matrix.
    #[error("{what} references vertex {vertex}, outside the distance matrix of size {size}")]
    MalformedTask {
        /// Description of the offending item.
        what: String,
        /// Offending vertex.
        vertex: usize,
        /// Matrix size.
        size: usize,
    },

    /// The network's vertex ids cannot index a dense distance matrix.
    #[error("vertex ids up to {size} are too large for a dense distance matrix")]
    NetworkTooLarge {
        /// Requested number of vertex slots.
        size: usize,
    },

    /// A line of an instance file could not be interpreted.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A mandatory instance header is absent.
    #[error("missing instance header '{0}'")]
    MissingHeader(&'static str),

    /// A produced solution broke coverage, capacity or closure.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O failure while reading an instance or writing a solution.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CarpError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infeasible_message() {
        let err = CarpError::InfeasibleInstance {
            kind: TaskKind::Edge,
            id: 7,
            demand: 12,
            capacity: 10,
        };
        assert_eq!(
            err.to_string(),
            "task E7 demands 12, exceeding vehicle capacity 10"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CarpError = io.into();
        assert!(matches!(err, CarpError::Io(_)));
    }
}
