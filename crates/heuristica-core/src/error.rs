//! Error types for Heuristica.

use thiserror::Error;

/// Main error type for Heuristica operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeuristicaError {
    /// A puzzle board failed validation before search.
    #[error("Invalid board: {message}")]
    InvalidBoard { message: String },

    /// A planning problem failed validation before planning.
    #[error("Invalid planning problem: {message}")]
    InvalidProblem { message: String },

    /// The solver expanded more nodes than its configured ceiling.
    #[error("Search limit exceeded: expanded {expanded} nodes, limit {limit}")]
    SearchLimitExceeded { expanded: usize, limit: usize },

    /// The goal-stack planner hit its iteration or stack-depth ceiling.
    #[error(
        "Planning did not converge after {iterations} iterations (depth {stack_depth}): {message}"
    )]
    PlanningDidNotConverge {
        iterations: usize,
        stack_depth: usize,
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HeuristicaError {
    /// Shorthand for an [`HeuristicaError::InvalidBoard`].
    pub fn invalid_board(message: impl Into<String>) -> Self {
        HeuristicaError::InvalidBoard {
            message: message.into(),
        }
    }

    /// Shorthand for an [`HeuristicaError::InvalidProblem`].
    pub fn invalid_problem(message: impl Into<String>) -> Self {
        HeuristicaError::InvalidProblem {
            message: message.into(),
        }
    }

    /// Returns true if retrying with a larger budget could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HeuristicaError::SearchLimitExceeded { .. }
                | HeuristicaError::PlanningDidNotConverge { .. }
        )
    }

    /// Returns true if the error was raised while validating input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HeuristicaError::InvalidBoard { .. } | HeuristicaError::InvalidProblem { .. }
        )
    }
}

/// Convenience Result type for Heuristica operations.
pub type Result<T> = std::result::Result<T, HeuristicaError>;

impl From<serde_json::Error> for HeuristicaError {
    fn from(err: serde_json::Error) -> Self {
        HeuristicaError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let limit = HeuristicaError::SearchLimitExceeded {
            expanded: 10,
            limit: 10,
        };
        assert!(limit.is_recoverable());

        let stuck = HeuristicaError::PlanningDidNotConverge {
            iterations: 1000,
            stack_depth: 12,
            message: "iteration ceiling reached".to_string(),
        };
        assert!(stuck.is_recoverable());

        assert!(!HeuristicaError::invalid_board("duplicate tile 3").is_recoverable());
    }

    #[test]
    fn test_validation_errors() {
        assert!(HeuristicaError::invalid_board("too short").is_validation());
        assert!(HeuristicaError::invalid_problem("no blocks").is_validation());
        assert!(!HeuristicaError::Internal("boom".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = HeuristicaError::invalid_board("expected 9 tiles, got 8");
        assert_eq!(err.to_string(), "Invalid board: expected 9 tiles, got 8");
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: HeuristicaError = parse.unwrap_err().into();
        assert!(matches!(err, HeuristicaError::SerializationError(_)));
    }
}
