//! Typed rows and the table set held by [`Database`](super::Database).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BookChanges, BookFormat, BookshelfType, ReadingStatus, Role};

use super::error::RepositoryError;

/// A row keyed by UUID with an optimistic-concurrency version.
pub trait Row: Clone {
    const TABLE: &'static str;

    fn id(&self) -> Uuid;
    fn version(&self) -> u64;
    fn touch(&mut self, updated_at: DateTime<Utc>);
}

macro_rules! impl_row {
    ($row:ty, $table:expr) => {
        impl Row for $row {
            const TABLE: &'static str = $table;

            fn id(&self) -> Uuid {
                self.id
            }

            fn version(&self) -> u64 {
                self.version
            }

            fn touch(&mut self, updated_at: DateTime<Utc>) {
                self.version += 1;
                self.updated_at = updated_at;
            }
        }
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table<R> {
    rows: BTreeMap<Uuid, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Row> Table<R> {
    pub fn get(&self, id: &Uuid) -> Option<&R> {
        self.rows.get(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.rows.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Option<&R> {
        self.rows.values().find(|row| predicate(row))
    }

    pub fn any(&self, predicate: impl Fn(&R) -> bool) -> bool {
        self.rows.values().any(predicate)
    }

    pub fn require(&self, id: &Uuid) -> Result<&R, RepositoryError> {
        self.rows.get(id).ok_or(RepositoryError::Missing {
            table: R::TABLE,
            id: *id,
        })
    }

    pub fn insert(&mut self, row: R) -> Result<(), RepositoryError> {
        let id = row.id();
        if self.rows.contains_key(&id) {
            return Err(RepositoryError::Duplicate { table: R::TABLE, id });
        }
        self.rows.insert(id, row);
        Ok(())
    }

    /// Apply `change` if the stored version still equals `expected_version`,
    /// then bump the version.
    pub fn update(
        &mut self,
        id: Uuid,
        expected_version: u64,
        updated_at: DateTime<Utc>,
        change: impl FnOnce(&mut R),
    ) -> Result<(), RepositoryError> {
        let row = self.rows.get_mut(&id).ok_or(RepositoryError::Missing {
            table: R::TABLE,
            id,
        })?;
        if row.version() != expected_version {
            return Err(RepositoryError::ConcurrentWrite {
                table: R::TABLE,
                id,
                expected: expected_version,
                actual: row.version(),
            });
        }
        change(row);
        row.touch(updated_at);
        Ok(())
    }

    /// Apply a store-driven change (cascades) regardless of the version a
    /// caller may hold. The version is still bumped so stale holders conflict.
    pub fn rewrite(&mut self, id: Uuid, updated_at: DateTime<Utc>, change: impl FnOnce(&mut R)) {
        if let Some(row) = self.rows.get_mut(&id) {
            change(row);
            row.touch(updated_at);
        }
    }

    /// Check the version without changing the row.
    pub fn check_version(&self, id: Uuid, expected_version: u64) -> Result<(), RepositoryError> {
        let actual = self.require(&id)?.version();
        if actual != expected_version {
            return Err(RepositoryError::ConcurrentWrite {
                table: R::TABLE,
                id,
                expected: expected_version,
                actual,
            });
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<R> {
        self.rows.remove(id)
    }

    /// Remove every matching row and return the removed ids.
    pub fn remove_where(&mut self, predicate: impl Fn(&R) -> bool) -> Vec<Uuid> {
        let ids: Vec<Uuid> = self
            .rows
            .values()
            .filter(|row| predicate(row))
            .map(Row::id)
            .collect();
        for id in &ids {
            self.rows.remove(id);
        }
        ids
    }
}

/// A many-to-many join stored as `(left, right)` pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    pairs: BTreeSet<(Uuid, Uuid)>,
}

impl Links {
    pub fn link(&mut self, left: Uuid, right: Uuid) -> bool {
        self.pairs.insert((left, right))
    }

    pub fn unlink(&mut self, left: Uuid, right: Uuid) -> bool {
        self.pairs.remove(&(left, right))
    }

    pub fn contains(&self, left: Uuid, right: Uuid) -> bool {
        self.pairs.contains(&(left, right))
    }

    pub fn rights_of(&self, left: Uuid) -> Vec<Uuid> {
        self.pairs
            .range((left, Uuid::nil())..=(left, Uuid::from_u128(u128::MAX)))
            .map(|(_, right)| *right)
            .collect()
    }

    pub fn lefts_of(&self, right: Uuid) -> Vec<Uuid> {
        self.pairs
            .iter()
            .filter(|(_, r)| *r == right)
            .map(|(left, _)| *left)
            .collect()
    }

    pub fn remove_left(&mut self, left: Uuid) {
        self.pairs.retain(|(l, _)| *l != left);
    }

    pub fn remove_right(&mut self, right: Uuid) {
        self.pairs.retain(|(_, r)| *r != right);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(UserRow, "users");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Bearer tokens are stored by the hex SHA-256 of their value, never in clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRow {
    pub hash: String,
    pub user_id: Uuid,
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRow {
    pub id: Uuid,
    pub name: String,
    pub is_approved: bool,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(AuthorRow, "authors");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(CategoryRow, "categories");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreRow {
    pub id: Uuid,
    pub name: String,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(GenreRow, "genres");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRow {
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
    pub category_id: Uuid,
    pub is_approved: bool,
    pub created_by: Option<Uuid>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(BookRow, "books");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookChangeRequestRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub changes: BookChanges,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(BookChangeRequestRow, "book_change_requests");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookshelfRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub bookshelf_type: BookshelfType,
    pub image_url: Option<String>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(BookshelfRow, "bookshelves");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBookRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub bookshelf_id: Uuid,
    pub status: ReadingStatus,
    pub is_favorite: bool,
    pub image_url: Option<String>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(UserBookRow, "user_books");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(CollectionRow, "collections");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReadingRow {
    pub id: Uuid,
    pub user_book_id: Uuid,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub started_at: NaiveDate,
    pub ended_at: Option<NaiveDate>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(BookReadingRow, "book_readings");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingRow {
    pub id: Uuid,
    pub user_book_id: Uuid,
    pub borrower: String,
    pub started_at: NaiveDate,
    pub ended_at: Option<NaiveDate>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(BorrowingRow, "borrowings");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub content: String,
    pub page: Option<String>,
    pub is_favorite: bool,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
impl_row!(QuoteRow, "quotes");

/// Every table in the library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    pub users: Table<UserRow>,
    pub tokens: BTreeMap<String, TokenRow>,
    pub authors: Table<AuthorRow>,
    pub categories: Table<CategoryRow>,
    pub genres: Table<GenreRow>,
    pub books: Table<BookRow>,
    /// `(book_id, author_id)`
    pub book_authors: Links,
    /// `(book_id, genre_id)`
    pub book_genres: Links,
    pub book_change_requests: Table<BookChangeRequestRow>,
    pub bookshelves: Table<BookshelfRow>,
    pub user_books: Table<UserBookRow>,
    /// `(user_book_id, collection_id)`
    pub user_book_collections: Links,
    pub collections: Table<CollectionRow>,
    pub book_readings: Table<BookReadingRow>,
    pub borrowings: Table<BorrowingRow>,
    pub quotes: Table<QuoteRow>,
}

/// Fail with [`RepositoryError::Unique`] when `taken` is true.
pub fn ensure_unique(
    taken: bool,
    table: &'static str,
    constraint: &'static str,
) -> Result<(), RepositoryError> {
    if taken {
        return Err(RepositoryError::Unique { table, constraint });
    }
    Ok(())
}
