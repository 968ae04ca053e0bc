//! Error types for the user application layer.

use repository_framework::DomainError;
use thiserror::Error;

/// Errors returned by user use cases.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The request was missing required input.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
