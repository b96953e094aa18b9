//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business failures.
///
/// Infrastructure faults (storage, transport) live in their own error types;
/// everything here is a rule of the bar being enforced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The named thing does not exist, e.g. a rollback target that was never
    /// published.
    #[error("not found")]
    NotFound,

    /// Optimistic concurrency failure, e.g. a publish against a stale live
    /// version.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller may not perform this operation (missing or wrong PIN).
    #[error("forbidden")]
    Forbidden,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
