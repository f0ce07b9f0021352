use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("concurrent write detected for {table} {id} (expected version {expected}, got {actual})")]
    ConcurrentWrite {
        table: &'static str,
        id: Uuid,
        expected: u64,
        actual: u64,
    },

    #[error("{table} {id} does not exist")]
    Missing { table: &'static str, id: Uuid },

    #[error("{table} {id} already exists")]
    Duplicate { table: &'static str, id: Uuid },

    /// A uniqueness rule other than the primary key was violated.
    #[error("a {table} row with this {constraint} already exists")]
    Unique {
        table: &'static str,
        constraint: &'static str,
    },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl RepositoryError {
    /// Errors caused by competing writes rather than a broken store.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RepositoryError::ConcurrentWrite { .. }
                | RepositoryError::Duplicate { .. }
                | RepositoryError::Unique { .. }
        )
    }
}
