use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::entity::Committable;

use super::error::RepositoryError;
use super::snapshot;
use super::tables::Tables;

/// The library's relational store.
///
/// Reads share the lock; writes run in [`Database::transaction`], which
/// applies the closure to a staged copy of the tables and publishes it only
/// when the closure succeeds. With a data file configured, every committed
/// transaction is written to disk before it becomes visible.
pub struct Database {
    tables: RwLock<Tables>,
    snapshot_path: Option<PathBuf>,
}

impl Default for Database {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Database {
    pub fn in_memory() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            snapshot_path: None,
        }
    }

    /// Open a file-backed store, loading the existing snapshot if any.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let tables = snapshot::read(&path)?.unwrap_or_default();
        debug!(path = %path.display(), users = tables.users.len(), books = tables.books.len(), "store opened");
        Ok(Self {
            tables: RwLock::new(tables),
            snapshot_path: Some(path),
        })
    }

    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(f(&tables))
    }

    /// Run `f` against a staged copy of the tables; all-or-nothing.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepositoryError>,
    {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;

        let mut staged = tables.clone();
        let value = f(&mut staged)?;

        if let Some(path) = &self.snapshot_path {
            snapshot::write(path, &staged)?;
        }
        *tables = staged;
        Ok(value)
    }

    /// Persist every entity in `items` in one transaction, then mark them
    /// committed. On failure nothing is written and the entities keep their
    /// pending actions.
    pub fn commit<C: Committable + ?Sized>(&self, items: &mut C) -> Result<(), RepositoryError> {
        let mut persistables = items.persistables();
        self.transaction(|tables| {
            for item in persistables.iter() {
                item.persist(tables)?;
            }
            Ok::<_, RepositoryError>(())
        })?;

        debug!(count = persistables.len(), "committed");
        for item in persistables.iter_mut() {
            item.mark_committed();
        }
        Ok(())
    }
}
