use thiserror::Error;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::OperationNotValidError;
use crate::store::RepositoryError;

/// Load a single aggregate by id.
pub trait FindById {
    type Aggregate: Aggregate;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Self::Aggregate>, RepositoryError>;
}

/// A write that can fail on a storage problem or on a business rule checked
/// inside the transaction.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Invalid(#[from] OperationNotValidError),
}

/// Case- and whitespace-insensitive text match used by name filters.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}
