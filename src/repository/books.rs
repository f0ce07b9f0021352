use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::{Book, BookAction, BookFormat};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, BookRow, Database, Paginated, Pagination, RepositoryError, SortOrder, Tables,
};

use super::cascade;
use super::repository::{contains_ci, FindById};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// A book with its category, authors and genres resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub id: Uuid,
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub release_year: i32,
    pub language: String,
    pub translator: Option<String>,
    pub format: BookFormat,
    pub pages: Option<u32>,
    pub image_url: Option<String>,
    pub category: NamedRef,
    pub authors: Vec<NamedRef>,
    pub genres: Vec<NamedRef>,
    pub is_approved: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookSort {
    #[default]
    Title,
    ReleaseYear,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Matches title, ISBN or any author name.
    pub search: Option<String>,
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub author_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub genre_id: Option<Uuid>,
    pub language: Option<String>,
    pub release_year_from: Option<i32>,
    pub release_year_to: Option<i32>,
    pub is_approved: Option<bool>,
    pub sort: BookSort,
    pub order: SortOrder,
}

pub struct BookRepository<'a> {
    db: &'a Database,
}

fn hydrate(row: &BookRow, tables: &Tables) -> Book {
    Book {
        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
        title: row.title.clone(),
        isbn: row.isbn.clone(),
        publisher: row.publisher.clone(),
        release_year: row.release_year,
        language: row.language.clone(),
        translator: row.translator.clone(),
        format: row.format,
        pages: row.pages,
        image_url: row.image_url.clone(),
        category_id: row.category_id,
        is_approved: row.is_approved,
        created_by: row.created_by,
        author_ids: tables.book_authors.rights_of(row.id),
        genre_ids: tables.book_genres.rights_of(row.id),
    }
}

fn sorted_refs(mut refs: Vec<NamedRef>) -> Vec<NamedRef> {
    refs.sort_by_key(|r| r.name.to_lowercase());
    refs
}

pub(crate) fn details(row: &BookRow, tables: &Tables) -> BookDetails {
    let authors = tables
        .book_authors
        .rights_of(row.id)
        .into_iter()
        .filter_map(|id| tables.authors.get(&id))
        .map(|author| NamedRef {
            id: author.id,
            name: author.name.clone(),
        })
        .collect();
    let genres = tables
        .book_genres
        .rights_of(row.id)
        .into_iter()
        .filter_map(|id| tables.genres.get(&id))
        .map(|genre| NamedRef {
            id: genre.id,
            name: genre.name.clone(),
        })
        .collect();
    let category = NamedRef {
        id: row.category_id,
        name: tables
            .categories
            .get(&row.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
    };

    BookDetails {
        id: row.id,
        title: row.title.clone(),
        isbn: row.isbn.clone(),
        publisher: row.publisher.clone(),
        release_year: row.release_year,
        language: row.language.clone(),
        translator: row.translator.clone(),
        format: row.format,
        pages: row.pages,
        image_url: row.image_url.clone(),
        category,
        authors: sorted_refs(authors),
        genres: sorted_refs(genres),
        is_approved: row.is_approved,
        created_by: row.created_by,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn normalized_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn matches_query(row: &BookRow, query: &BookQuery, tables: &Tables) -> bool {
    if let Some(search) = query.search.as_deref() {
        let by_text = contains_ci(&row.title, search)
            || row.isbn.contains(&normalized_isbn(search));
        let by_author = || {
            tables
                .book_authors
                .rights_of(row.id)
                .iter()
                .filter_map(|id| tables.authors.get(id))
                .any(|author| contains_ci(&author.name, search))
        };
        if !by_text && !by_author() {
            return false;
        }
    }
    if let Some(title) = query.title.as_deref() {
        if !contains_ci(&row.title, title) {
            return false;
        }
    }
    if let Some(isbn) = query.isbn.as_deref() {
        if row.isbn != normalized_isbn(isbn) {
            return false;
        }
    }
    if let Some(author_id) = query.author_id {
        if !tables.book_authors.contains(row.id, author_id) {
            return false;
        }
    }
    if let Some(genre_id) = query.genre_id {
        if !tables.book_genres.contains(row.id, genre_id) {
            return false;
        }
    }
    if query.category_id.is_some_and(|id| id != row.category_id) {
        return false;
    }
    if let Some(language) = query.language.as_deref() {
        if !row.language.eq_ignore_ascii_case(language.trim()) {
            return false;
        }
    }
    if query.release_year_from.is_some_and(|from| row.release_year < from) {
        return false;
    }
    if query.release_year_to.is_some_and(|to| row.release_year > to) {
        return false;
    }
    query
        .is_approved
        .map_or(true, |approved| row.is_approved == approved)
}

impl<'a> BookRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, RepositoryError> {
        let isbn = normalized_isbn(isbn);
        self.db.read(|tables| {
            tables
                .books
                .find(|row| row.isbn == isbn)
                .map(|row| hydrate(row, tables))
        })
    }

    /// The subset of `isbns` already present in the catalog.
    pub fn existing_isbns(&self, isbns: &[String]) -> Result<HashSet<String>, RepositoryError> {
        let wanted: HashSet<String> = isbns.iter().map(|isbn| normalized_isbn(isbn)).collect();
        self.db.read(|tables| {
            tables
                .books
                .iter()
                .filter(|row| wanted.contains(&row.isbn))
                .map(|row| row.isbn.clone())
                .collect()
        })
    }

    pub fn find_details(&self, id: Uuid) -> Result<Option<BookDetails>, RepositoryError> {
        self.db
            .read(|tables| tables.books.get(&id).map(|row| details(row, tables)))
    }

    pub fn find_many(
        &self,
        query: &BookQuery,
        pagination: Pagination,
    ) -> Result<Paginated<BookDetails>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&BookRow> = tables
                .books
                .iter()
                .filter(|row| matches_query(row, query, tables))
                .collect();
            rows.sort_by(|a, b| {
                let ordering = match query.sort {
                    BookSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                    BookSort::ReleaseYear => a.release_year.cmp(&b.release_year),
                    BookSort::CreatedAt => a.created_at.cmp(&b.created_at),
                };
                query.order.apply(ordering.then_with(|| a.id.cmp(&b.id)))
            });
            pagination.apply(rows).map(|row| details(row, tables))
        })
    }

    /// Delete a book with everything that refers to it.
    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.db
            .transaction(|tables| Ok(cascade::delete_book(tables, id)))
    }
}

impl FindById for BookRepository<'_> {
    type Aggregate = Book;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, RepositoryError> {
        self.db
            .read(|tables| tables.books.get(&id).map(|row| hydrate(row, tables)))
    }
}

fn ensure_isbn_free(tables: &Tables, isbn: &str, except: Uuid) -> Result<(), RepositoryError> {
    ensure_unique(
        tables.books.any(|row| row.id != except && row.isbn == isbn),
        "books",
        "isbn",
    )
}

fn require_author(tables: &Tables, id: Uuid) -> Result<(), RepositoryError> {
    tables.authors.require(&id).map(|_| ())
}

fn require_genre(tables: &Tables, id: Uuid) -> Result<(), RepositoryError> {
    tables.genres.require(&id).map(|_| ())
}

impl Persist for Book {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        let id = entity.id();

        if entity.is_new() {
            ensure_isbn_free(tables, &self.isbn, id)?;
            tables.categories.require(&self.category_id)?;
            for author_id in &self.author_ids {
                require_author(tables, *author_id)?;
                tables.book_authors.link(id, *author_id);
            }
            for genre_id in &self.genre_ids {
                require_genre(tables, *genre_id)?;
                tables.book_genres.link(id, *genre_id);
            }
            return tables.books.insert(BookRow {
                id,
                title: self.title.clone(),
                isbn: self.isbn.clone(),
                publisher: self.publisher.clone(),
                release_year: self.release_year,
                language: self.language.clone(),
                translator: self.translator.clone(),
                format: self.format,
                pages: self.pages,
                image_url: self.image_url.clone(),
                category_id: self.category_id,
                is_approved: self.is_approved,
                created_by: self.created_by,
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(book = %id, actions = ?self.pending_action_types(), "persisting book");
        tables.books.check_version(id, entity.version())?;
        for action in entity.pending_actions() {
            match action {
                BookAction::UpdateIsbn(isbn) => ensure_isbn_free(tables, isbn, id)?,
                BookAction::UpdateCategory(category_id) => {
                    tables.categories.require(category_id)?;
                }
                BookAction::AddAuthor(author_id) => {
                    require_author(tables, *author_id)?;
                    tables.book_authors.link(id, *author_id);
                }
                BookAction::DeleteAuthor(author_id) => {
                    tables.book_authors.unlink(id, *author_id);
                }
                BookAction::AddGenre(genre_id) => {
                    require_genre(tables, *genre_id)?;
                    tables.book_genres.link(id, *genre_id);
                }
                BookAction::DeleteGenre(genre_id) => {
                    tables.book_genres.unlink(id, *genre_id);
                }
                _ => {}
            }
        }

        tables
            .books
            .update(id, entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        BookAction::UpdateTitle(title) => row.title = title.clone(),
                        BookAction::UpdateIsbn(isbn) => row.isbn = isbn.clone(),
                        BookAction::UpdatePublisher(publisher) => {
                            row.publisher = publisher.clone()
                        }
                        BookAction::UpdateReleaseYear(year) => row.release_year = *year,
                        BookAction::UpdateLanguage(language) => row.language = language.clone(),
                        BookAction::UpdateTranslator(translator) => {
                            row.translator = translator.clone()
                        }
                        BookAction::UpdateFormat(format) => row.format = *format,
                        BookAction::UpdatePages(pages) => row.pages = *pages,
                        BookAction::UpdateImageUrl(url) => row.image_url = url.clone(),
                        BookAction::UpdateCategory(category_id) => row.category_id = *category_id,
                        BookAction::UpdateIsApproved(approved) => row.is_approved = *approved,
                        BookAction::AddAuthor(_)
                        | BookAction::DeleteAuthor(_)
                        | BookAction::AddGenre(_)
                        | BookAction::DeleteGenre(_) => {}
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
