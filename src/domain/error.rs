//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::PersonId;

/// Raised when a single field fails validation.
///
/// `field` names the offending field so callers can re-prompt for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{role} not found (ID: {id})")]
    PersonNotFound { role: &'static str, id: PersonId },

    #[error("cannot create {relationship} relationship with self")]
    SelfRelationship { relationship: &'static str },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
