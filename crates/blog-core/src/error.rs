//! Domain-level error types.

use std::fmt;

use thiserror::Error;

/// The post operation that was running when an unexpected failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Fetch,
    Update,
    Delete,
}

impl Operation {
    /// Opaque message shown to callers when the operation fails unexpectedly.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create post",
            Operation::List => "Failed to fetch posts",
            Operation::Fetch => "Failed to fetch post",
            Operation::Update => "Failed to update post",
            Operation::Delete => "Failed to delete post",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post not found")]
    NotFound,

    #[error("Not authorized")]
    Forbidden,

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage or constraint failure. `cause` is for server logs only.
    #[error("{operation}")]
    Failed { operation: Operation, cause: String },
}

impl DomainError {
    pub fn failed(operation: Operation, cause: impl fmt::Display) -> Self {
        Self::Failed {
            operation,
            cause: cause.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
