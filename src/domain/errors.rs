//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Validation error with message
    Validation(String),
    /// Configuration error: unrecognized column, missing display label.
    /// Fatal and surfaced at startup, never user-recoverable.
    Configuration(String),
    /// Analytical store error
    Database(String),
    /// External archive error. Transient; callers surface it as retryable.
    External(String),
}

impl DomainError {
    /// External failures are the only retryable class.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::External(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::External(msg) => write!(f, "External service error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<duckdb::Error> for DomainError {
    fn from(e: duckdb::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}
