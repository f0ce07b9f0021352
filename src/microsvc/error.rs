//! Error types for command handlers and their HTTP status mapping.

use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::HashError;
use crate::domain::OperationNotValidError;
use crate::repository::WriteError;
use crate::store::RepositoryError;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("malformed input: {0}")]
    DecodeFailed(String),

    /// A business rule rejected the command.
    #[error("{}", .0.reason)]
    Invalid(#[source] OperationNotValidError),

    #[error("{0} not found")]
    NotFound(String),

    /// Missing, expired or unknown credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Required input fields are missing.
    #[error("{0}: required fields are missing")]
    GuardRejected(String),

    #[error("repository error: {0}")]
    Repository(#[source] RepositoryError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

impl From<RepositoryError> for HandlerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Missing { table, id } => {
                HandlerError::NotFound(format!("{} {}", table, id))
            }
            RepositoryError::Unique { .. } | RepositoryError::Duplicate { .. } => {
                HandlerError::Conflict(err.to_string())
            }
            other => HandlerError::Repository(other),
        }
    }
}

impl From<OperationNotValidError> for HandlerError {
    fn from(err: OperationNotValidError) -> Self {
        HandlerError::Invalid(err)
    }
}

impl From<WriteError> for HandlerError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Repository(e) => e.into(),
            WriteError::Invalid(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::DecodeFailed(_)
            | HandlerError::Invalid(_)
            | HandlerError::GuardRejected(_) => 400,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Forbidden(_) => 403,
            HandlerError::UnknownCommand(_) | HandlerError::NotFound(_) => 404,
            HandlerError::Conflict(_)
            | HandlerError::Repository(RepositoryError::ConcurrentWrite { .. }) => 409,
            HandlerError::Repository(_) | HandlerError::Hash(_) => 500,
        }
    }

    /// JSON error body: `{ "error", "status", "context"? }`.
    pub fn body(&self) -> Value {
        let mut body = json!({ "error": self.to_string(), "status": self.status_code() });
        if let HandlerError::Invalid(err) = self {
            if !err.context.is_null() {
                body["context"] = err.context.clone();
            }
        }
        body
    }
}
