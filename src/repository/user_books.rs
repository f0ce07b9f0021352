use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::{ReadingStatus, UserBook, UserBookAction};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, Database, Paginated, Pagination, RepositoryError, SortOrder, Tables,
    UserBookRow,
};

use super::books::NamedRef;
use super::cascade;
use super::repository::{contains_ci, FindById};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub isbn: String,
    pub image_url: Option<String>,
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBookView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book: BookSummary,
    pub bookshelf: NamedRef,
    pub status: ReadingStatus,
    pub is_favorite: bool,
    pub image_url: Option<String>,
    pub collection_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserBookSort {
    #[default]
    CreatedAt,
    Title,
}

#[derive(Debug, Clone, Default)]
pub struct UserBookQuery {
    pub user_id: Option<Uuid>,
    pub bookshelf_id: Option<Uuid>,
    pub status: Option<ReadingStatus>,
    pub is_favorite: Option<bool>,
    pub collection_id: Option<Uuid>,
    /// Matches the book title or an author name.
    pub title: Option<String>,
    pub sort: UserBookSort,
    pub order: SortOrder,
}

pub struct UserBookRepository<'a> {
    db: &'a Database,
}

fn hydrate(row: &UserBookRow, tables: &Tables) -> UserBook {
    UserBook {
        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
        user_id: row.user_id,
        book_id: row.book_id,
        bookshelf_id: row.bookshelf_id,
        status: row.status,
        is_favorite: row.is_favorite,
        image_url: row.image_url.clone(),
        collection_ids: tables.user_book_collections.rights_of(row.id),
    }
}

fn author_names(tables: &Tables, book_id: Uuid) -> Vec<String> {
    let mut names: Vec<String> = tables
        .book_authors
        .rights_of(book_id)
        .iter()
        .filter_map(|id| tables.authors.get(id))
        .map(|author| author.name.clone())
        .collect();
    names.sort();
    names
}

fn book_title(tables: &Tables, book_id: Uuid) -> String {
    tables
        .books
        .get(&book_id)
        .map(|book| book.title.clone())
        .unwrap_or_default()
}

fn view(row: &UserBookRow, tables: &Tables) -> UserBookView {
    let book = match tables.books.get(&row.book_id) {
        Some(book) => BookSummary {
            id: book.id,
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            image_url: book.image_url.clone(),
            authors: author_names(tables, book.id),
        },
        None => BookSummary {
            id: row.book_id,
            title: String::new(),
            isbn: String::new(),
            image_url: None,
            authors: Vec::new(),
        },
    };
    UserBookView {
        id: row.id,
        user_id: row.user_id,
        book,
        bookshelf: NamedRef {
            id: row.bookshelf_id,
            name: tables
                .bookshelves
                .get(&row.bookshelf_id)
                .map(|shelf| shelf.name.clone())
                .unwrap_or_default(),
        },
        status: row.status,
        is_favorite: row.is_favorite,
        image_url: row.image_url.clone(),
        collection_ids: tables.user_book_collections.rights_of(row.id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn matches_query(row: &UserBookRow, query: &UserBookQuery, tables: &Tables) -> bool {
    if query.user_id.is_some_and(|id| id != row.user_id)
        || query.bookshelf_id.is_some_and(|id| id != row.bookshelf_id)
        || query.status.is_some_and(|status| status != row.status)
        || query.is_favorite.is_some_and(|favorite| favorite != row.is_favorite)
    {
        return false;
    }
    if let Some(collection_id) = query.collection_id {
        if !tables.user_book_collections.contains(row.id, collection_id) {
            return false;
        }
    }
    if let Some(title) = query.title.as_deref() {
        let by_title = contains_ci(&book_title(tables, row.book_id), title);
        if !by_title
            && !author_names(tables, row.book_id)
                .iter()
                .any(|name| contains_ci(name, title))
        {
            return false;
        }
    }
    true
}

impl<'a> UserBookRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_details(&self, id: Uuid) -> Result<Option<UserBookView>, RepositoryError> {
        self.db
            .read(|tables| tables.user_books.get(&id).map(|row| view(row, tables)))
    }

    pub fn find_by_user_and_book(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<UserBook>, RepositoryError> {
        self.db.read(|tables| {
            tables
                .user_books
                .find(|row| row.user_id == user_id && row.book_id == book_id)
                .map(|row| hydrate(row, tables))
        })
    }

    pub fn find_many(
        &self,
        query: &UserBookQuery,
        pagination: Pagination,
    ) -> Result<Paginated<UserBookView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&UserBookRow> = tables
                .user_books
                .iter()
                .filter(|row| matches_query(row, query, tables))
                .collect();
            rows.sort_by(|a, b| {
                let ordering = match query.sort {
                    UserBookSort::CreatedAt => a.created_at.cmp(&b.created_at),
                    UserBookSort::Title => book_title(tables, a.book_id)
                        .to_lowercase()
                        .cmp(&book_title(tables, b.book_id).to_lowercase()),
                };
                query.order.apply(ordering.then_with(|| a.id.cmp(&b.id)))
            });
            pagination.apply(rows).map(|row| view(row, tables))
        })
    }

    /// Delete a user book with its readings, borrowings and collection links.
    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.db.transaction(|tables| {
            if !tables.user_books.contains(&id) {
                return Ok(false);
            }
            cascade::delete_user_books(tables, &[id]);
            Ok(true)
        })
    }
}

impl FindById for UserBookRepository<'_> {
    type Aggregate = UserBook;

    fn find_by_id(&self, id: Uuid) -> Result<Option<UserBook>, RepositoryError> {
        self.db
            .read(|tables| tables.user_books.get(&id).map(|row| hydrate(row, tables)))
    }
}

impl Persist for UserBook {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        let id = entity.id();

        if entity.is_new() {
            tables.users.require(&self.user_id)?;
            tables.books.require(&self.book_id)?;
            tables.bookshelves.require(&self.bookshelf_id)?;
            ensure_unique(
                tables
                    .user_books
                    .any(|row| row.user_id == self.user_id && row.book_id == self.book_id),
                "user_books",
                "book",
            )?;
            for collection_id in &self.collection_ids {
                tables.collections.require(collection_id)?;
                tables.user_book_collections.link(id, *collection_id);
            }
            return tables.user_books.insert(UserBookRow {
                id,
                user_id: self.user_id,
                book_id: self.book_id,
                bookshelf_id: self.bookshelf_id,
                status: self.status,
                is_favorite: self.is_favorite,
                image_url: self.image_url.clone(),
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(user_book = %id, actions = ?self.pending_action_types(), "persisting user book");
        tables.user_books.check_version(id, entity.version())?;
        for action in entity.pending_actions() {
            match action {
                UserBookAction::UpdateBookshelf { to, .. } => {
                    tables.bookshelves.require(to)?;
                }
                UserBookAction::AddCollection(collection_id) => {
                    tables.collections.require(collection_id)?;
                    tables.user_book_collections.link(id, *collection_id);
                }
                UserBookAction::DeleteCollection(collection_id) => {
                    tables.user_book_collections.unlink(id, *collection_id);
                }
                _ => {}
            }
        }

        tables
            .user_books
            .update(id, entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        UserBookAction::UpdateStatus(status) => row.status = *status,
                        UserBookAction::UpdateIsFavorite(favorite) => row.is_favorite = *favorite,
                        UserBookAction::UpdateBookshelf { to, .. } => row.bookshelf_id = *to,
                        UserBookAction::UpdateImageUrl(url) => row.image_url = url.clone(),
                        UserBookAction::AddCollection(_) | UserBookAction::DeleteCollection(_) => {}
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
