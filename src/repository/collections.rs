use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::author::normalize_name;
use crate::domain::{Collection, CollectionAction};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, CollectionRow, Database, Paginated, Pagination, RepositoryError, Tables,
};

use super::cascade;
use super::repository::{contains_ci, FindById};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub user_book_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionQuery {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
}

pub struct CollectionRepository<'a> {
    db: &'a Database,
}

fn hydrate(row: &CollectionRow) -> Collection {
    Collection {
        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
        user_id: row.user_id,
        name: row.name.clone(),
    }
}

fn view(row: &CollectionRow, tables: &Tables) -> CollectionView {
    CollectionView {
        id: row.id,
        user_id: row.user_id,
        name: row.name.clone(),
        user_book_count: tables.user_book_collections.lefts_of(row.id).len(),
        created_at: row.created_at,
    }
}

impl<'a> CollectionRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<CollectionView>, RepositoryError> {
        self.db
            .read(|tables| tables.collections.get(&id).map(|row| view(row, tables)))
    }

    pub fn find_by_user_and_name(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Option<Collection>, RepositoryError> {
        let wanted = normalize_name(name);
        self.db.read(|tables| {
            tables
                .collections
                .find(|row| row.user_id == user_id && normalize_name(&row.name) == wanted)
                .map(hydrate)
        })
    }

    /// Collections among `ids` that do not exist or belong to someone else.
    pub fn foreign(&self, user_id: Uuid, ids: &[Uuid]) -> Result<Vec<Uuid>, RepositoryError> {
        self.db.read(|tables| {
            ids.iter()
                .filter(|id| {
                    tables
                        .collections
                        .get(id)
                        .map_or(true, |row| row.user_id != user_id)
                })
                .copied()
                .collect()
        })
    }

    pub fn find_many(
        &self,
        query: &CollectionQuery,
        pagination: Pagination,
    ) -> Result<Paginated<CollectionView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&CollectionRow> = tables
                .collections
                .iter()
                .filter(|row| query.user_id.map_or(true, |id| row.user_id == id))
                .filter(|row| {
                    query
                        .name
                        .as_deref()
                        .map_or(true, |name| contains_ci(&row.name, name))
                })
                .collect();
            rows.sort_by_key(|row| row.name.to_lowercase());
            pagination.apply(rows).map(|row| view(row, tables))
        })
    }

    /// Delete a collection. The user books stay; only their links go.
    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.db
            .transaction(|tables| Ok(cascade::delete_collection(tables, id)))
    }
}

impl FindById for CollectionRepository<'_> {
    type Aggregate = Collection;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Collection>, RepositoryError> {
        self.db.read(|tables| tables.collections.get(&id).map(hydrate))
    }
}

fn name_taken(tables: &Tables, user_id: Uuid, name: &str, except: Uuid) -> bool {
    let wanted = normalize_name(name);
    tables.collections.any(|row| {
        row.id != except && row.user_id == user_id && normalize_name(&row.name) == wanted
    })
}

impl Persist for Collection {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        let id = entity.id();
        if entity.is_new() {
            tables.users.require(&self.user_id)?;
            ensure_unique(
                name_taken(tables, self.user_id, &self.name, id),
                "collections",
                "name",
            )?;
            return tables.collections.insert(CollectionRow {
                id,
                user_id: self.user_id,
                name: self.name.clone(),
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(collection = %id, actions = ?self.pending_action_types(), "persisting collection");
        ensure_unique(
            name_taken(tables, self.user_id, &self.name, id),
            "collections",
            "name",
        )?;
        tables
            .collections
            .update(id, entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        CollectionAction::UpdateName(name) => row.name = name.clone(),
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
