use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A business rule rejected an operation.
///
/// `context` carries structured details (offending field, ids) that the HTTP
/// layer returns next to the message.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{reason}")]
pub struct OperationNotValidError {
    pub reason: String,
    pub context: Value,
}

impl OperationNotValidError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            context: Value::Null,
        }
    }

    pub fn with_context(reason: impl Into<String>, context: Value) -> Self {
        Self {
            reason: reason.into(),
            context,
        }
    }

    /// Shorthand for a validation failure on a single input field.
    pub fn field(field: &str, reason: impl Into<String>) -> Self {
        Self::with_context(reason, serde_json::json!({ "field": field }))
    }
}

pub type DomainResult<T> = Result<T, OperationNotValidError>;
