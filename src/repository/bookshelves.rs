use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::author::normalize_name;
use crate::domain::{Bookshelf, BookshelfAction, BookshelfType, OperationNotValidError};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, BookshelfRow, Database, Paginated, Pagination, RepositoryError, Tables,
};

use super::repository::{contains_ci, FindById, WriteError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookshelfView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub bookshelf_type: BookshelfType,
    pub image_url: Option<String>,
    pub book_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BookshelfQuery {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub bookshelf_type: Option<BookshelfType>,
}

pub struct BookshelfRepository<'a> {
    db: &'a Database,
}

fn hydrate(row: &BookshelfRow) -> Bookshelf {
    Bookshelf {
        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
        user_id: row.user_id,
        name: row.name.clone(),
        bookshelf_type: row.bookshelf_type,
        image_url: row.image_url.clone(),
    }
}

fn book_count(tables: &Tables, bookshelf_id: Uuid) -> usize {
    tables
        .user_books
        .iter()
        .filter(|row| row.bookshelf_id == bookshelf_id)
        .count()
}

fn view(row: &BookshelfRow, tables: &Tables) -> BookshelfView {
    BookshelfView {
        id: row.id,
        user_id: row.user_id,
        name: row.name.clone(),
        bookshelf_type: row.bookshelf_type,
        image_url: row.image_url.clone(),
        book_count: book_count(tables, row.id),
        created_at: row.created_at,
    }
}

impl<'a> BookshelfRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<BookshelfView>, RepositoryError> {
        self.db
            .read(|tables| tables.bookshelves.get(&id).map(|row| view(row, tables)))
    }

    pub fn find_by_user_and_type(
        &self,
        user_id: Uuid,
        bookshelf_type: BookshelfType,
    ) -> Result<Option<Bookshelf>, RepositoryError> {
        self.db.read(|tables| {
            tables
                .bookshelves
                .find(|row| row.user_id == user_id && row.bookshelf_type == bookshelf_type)
                .map(hydrate)
        })
    }

    pub fn count_user_books(&self, bookshelf_id: Uuid) -> Result<usize, RepositoryError> {
        self.db.read(|tables| book_count(tables, bookshelf_id))
    }

    /// Special shelves first, then by name.
    pub fn find_many(
        &self,
        query: &BookshelfQuery,
        pagination: Pagination,
    ) -> Result<Paginated<BookshelfView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&BookshelfRow> = tables
                .bookshelves
                .iter()
                .filter(|row| query.user_id.map_or(true, |id| row.user_id == id))
                .filter(|row| {
                    query
                        .name
                        .as_deref()
                        .map_or(true, |name| contains_ci(&row.name, name))
                })
                .filter(|row| {
                    query
                        .bookshelf_type
                        .map_or(true, |kind| row.bookshelf_type == kind)
                })
                .collect();
            rows.sort_by(|a, b| {
                let standard = |row: &BookshelfRow| row.bookshelf_type == BookshelfType::Standard;
                standard(*a)
                    .cmp(&standard(*b))
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
            pagination.apply(rows).map(|row| view(row, tables))
        })
    }

    /// Delete a standard, empty bookshelf.
    pub fn delete(&self, id: Uuid) -> Result<bool, WriteError> {
        self.db.transaction(|tables| {
            let Some(row) = tables.bookshelves.get(&id) else {
                return Ok(false);
            };
            hydrate(row).ensure_deletable()?;
            let count = book_count(tables, id);
            if count > 0 {
                return Err(OperationNotValidError::with_context(
                    "Bookshelf is not empty",
                    serde_json::json!({ "bookshelfId": id, "bookCount": count }),
                )
                .into());
            }
            tables.bookshelves.remove(&id);
            Ok(true)
        })
    }
}

impl FindById for BookshelfRepository<'_> {
    type Aggregate = Bookshelf;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Bookshelf>, RepositoryError> {
        self.db.read(|tables| tables.bookshelves.get(&id).map(hydrate))
    }
}

fn name_taken(tables: &Tables, user_id: Uuid, name: &str, except: Uuid) -> bool {
    let wanted = normalize_name(name);
    tables.bookshelves.any(|row| {
        row.id != except && row.user_id == user_id && normalize_name(&row.name) == wanted
    })
}

impl Persist for Bookshelf {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        let id = entity.id();
        if entity.is_new() {
            tables.users.require(&self.user_id)?;
            ensure_unique(
                name_taken(tables, self.user_id, &self.name, id),
                "bookshelves",
                "name",
            )?;
            return tables.bookshelves.insert(BookshelfRow {
                id,
                user_id: self.user_id,
                name: self.name.clone(),
                bookshelf_type: self.bookshelf_type,
                image_url: self.image_url.clone(),
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(bookshelf = %id, actions = ?self.pending_action_types(), "persisting bookshelf");
        if entity
            .pending_actions()
            .iter()
            .any(|action| matches!(action, BookshelfAction::UpdateName(_)))
        {
            ensure_unique(
                name_taken(tables, self.user_id, &self.name, id),
                "bookshelves",
                "name",
            )?;
        }
        tables
            .bookshelves
            .update(id, entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        BookshelfAction::UpdateName(name) => row.name = name.clone(),
                        BookshelfAction::UpdateImageUrl(url) => row.image_url = url.clone(),
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
