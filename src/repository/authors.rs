use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::author::normalize_name;
use crate::domain::{Author, AuthorAction, OperationNotValidError};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, AuthorRow, Database, Paginated, Pagination, RepositoryError, Tables,
};

use super::repository::{contains_ci, FindById, WriteError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: Uuid,
    pub name: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&AuthorRow> for AuthorView {
    fn from(row: &AuthorRow) -> Self {
        AuthorView {
            id: row.id,
            name: row.name.clone(),
            is_approved: row.is_approved,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthorQuery {
    pub name: Option<String>,
    pub is_approved: Option<bool>,
    pub ids: Option<Vec<Uuid>>,
}

pub struct AuthorRepository<'a> {
    db: &'a Database,
}

fn hydrate(row: &AuthorRow) -> Author {
    Author {
        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
        name: row.name.clone(),
        is_approved: row.is_approved,
    }
}

impl<'a> AuthorRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<AuthorView>, RepositoryError> {
        self.db.read(|tables| tables.authors.get(&id).map(AuthorView::from))
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepositoryError> {
        let wanted = normalize_name(name);
        self.db.read(|tables| {
            tables
                .authors
                .find(|row| normalize_name(&row.name) == wanted)
                .map(hydrate)
        })
    }

    /// Authors whose name matches any of `names`, ignoring case and spacing.
    pub fn find_by_names(&self, names: &[String]) -> Result<Vec<Author>, RepositoryError> {
        let wanted: HashSet<String> = names.iter().map(|name| normalize_name(name)).collect();
        self.db.read(|tables| {
            tables
                .authors
                .iter()
                .filter(|row| wanted.contains(&normalize_name(&row.name)))
                .map(hydrate)
                .collect()
        })
    }

    /// Ids from `ids` that have no author row.
    pub fn missing(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, RepositoryError> {
        self.db.read(|tables| {
            ids.iter()
                .filter(|id| !tables.authors.contains(id))
                .copied()
                .collect()
        })
    }

    pub fn find_many(
        &self,
        query: &AuthorQuery,
        pagination: Pagination,
    ) -> Result<Paginated<AuthorView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&AuthorRow> = tables
                .authors
                .iter()
                .filter(|row| {
                    query
                        .name
                        .as_deref()
                        .map_or(true, |name| contains_ci(&row.name, name))
                })
                .filter(|row| query.is_approved.map_or(true, |approved| row.is_approved == approved))
                .filter(|row| query.ids.as_ref().map_or(true, |ids| ids.contains(&row.id)))
                .collect();
            rows.sort_by_key(|row| row.name.to_lowercase());
            pagination.apply(rows).map(AuthorView::from)
        })
    }

    /// Delete an author unless some book would be left without authors.
    /// Links to books with other authors are removed.
    pub fn delete(&self, id: Uuid) -> Result<bool, WriteError> {
        self.db.transaction(|tables| {
            if !tables.authors.contains(&id) {
                return Ok(false);
            }
            let books = tables.book_authors.lefts_of(id);
            let orphaned: Vec<Uuid> = books
                .iter()
                .filter(|book| tables.book_authors.rights_of(**book).len() == 1)
                .copied()
                .collect();
            if !orphaned.is_empty() {
                return Err(OperationNotValidError::with_context(
                    "Author is the only author of some books",
                    serde_json::json!({ "authorId": id, "bookIds": orphaned }),
                )
                .into());
            }
            for book in books {
                tables.book_authors.unlink(book, id);
            }
            tables.authors.remove(&id);
            Ok(true)
        })
    }
}

impl FindById for AuthorRepository<'_> {
    type Aggregate = Author;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepositoryError> {
        self.db.read(|tables| tables.authors.get(&id).map(hydrate))
    }
}

fn name_taken(tables: &Tables, name: &str, except: Uuid) -> bool {
    let wanted = normalize_name(name);
    tables
        .authors
        .any(|row| row.id != except && normalize_name(&row.name) == wanted)
}

impl Persist for Author {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        if entity.is_new() {
            ensure_unique(name_taken(tables, &self.name, entity.id()), "authors", "name")?;
            return tables.authors.insert(AuthorRow {
                id: entity.id(),
                name: self.name.clone(),
                is_approved: self.is_approved,
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(author = %entity.id(), actions = ?self.pending_action_types(), "persisting author");
        if entity
            .pending_actions()
            .iter()
            .any(|action| matches!(action, AuthorAction::UpdateName(_)))
        {
            ensure_unique(name_taken(tables, &self.name, entity.id()), "authors", "name")?;
        }
        tables
            .authors
            .update(entity.id(), entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        AuthorAction::UpdateName(name) => row.name = name.clone(),
                        AuthorAction::UpdateIsApproved(approved) => row.is_approved = *approved,
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
