//! # Domain Errors
//!
//! Errors shared by every repository and entity. They are distinguishable
//! kinds so that callers (and the HTTP layer above them) can branch on them.

use crate::validator::FieldsErrors;

/// Errors raised by entities, repositories and the repository actor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// No entity matched the requested identifier (or lookup key).
    #[error("{0}")]
    NotFound(String),

    /// A domain-level uniqueness rule was violated (e.g. duplicate email).
    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// An entity payload was rejected by its validator.
    #[error("Entity Validation Error")]
    EntityValidation(FieldsErrors),

    #[error("Repository closed")]
    RepositoryClosed,

    #[error("Repository dropped response channel")]
    RepositoryDropped,
}

impl DomainError {
    /// The not-found error raised by id-based repository operations.
    pub fn entity_not_found() -> Self {
        Self::NotFound("Entity not found".to_string())
    }

    /// Field errors carried by an [`DomainError::EntityValidation`].
    pub fn field_errors(&self) -> Option<&FieldsErrors> {
        match self {
            Self::EntityValidation(errors) => Some(errors),
            _ => None,
        }
    }
}
