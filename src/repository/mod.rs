//! Repositories over the [`Database`](crate::store::Database) tables.
//!
//! Each resource has a borrowed repository (`db.books()`, `db.users()`, ...)
//! for reads and cascading deletes. Writes of aggregates go through
//! [`Database::commit`](crate::store::Database::commit) and the [`Persist`](crate::entity::Persist)
//! impls defined next to each repository.

mod authors;
mod book_change_requests;
mod book_readings;
mod books;
mod bookshelves;
mod borrowings;
mod cascade;
mod catalog;
mod collections;
mod quotes;
#[allow(clippy::module_inception)]
mod repository;
mod user_books;
mod users;

pub use authors::{AuthorQuery, AuthorRepository, AuthorView};
pub use book_change_requests::{
    BookChangeRequestQuery, BookChangeRequestRepository, BookChangeRequestView,
};
pub use book_readings::{BookReadingQuery, BookReadingRepository, BookReadingView};
pub use books::{BookDetails, BookQuery, BookRepository, BookSort, NamedRef};
pub use bookshelves::{BookshelfQuery, BookshelfRepository, BookshelfView};
pub use borrowings::{BorrowingQuery, BorrowingRepository, BorrowingView};
pub use catalog::{CatalogView, CategoryRepository, GenreRepository};
pub use collections::{CollectionQuery, CollectionRepository, CollectionView};
pub use quotes::{QuoteQuery, QuoteRepository, QuoteView};
pub use repository::{FindById, WriteError};
pub use user_books::{BookSummary, UserBookQuery, UserBookRepository, UserBookSort, UserBookView};
pub use users::{UserQuery, UserRepository, UserView};

use crate::store::Database;

impl Database {
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    pub fn authors(&self) -> AuthorRepository<'_> {
        AuthorRepository::new(self)
    }

    pub fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(self)
    }

    pub fn genres(&self) -> GenreRepository<'_> {
        GenreRepository::new(self)
    }

    pub fn books(&self) -> BookRepository<'_> {
        BookRepository::new(self)
    }

    pub fn book_change_requests(&self) -> BookChangeRequestRepository<'_> {
        BookChangeRequestRepository::new(self)
    }

    pub fn bookshelves(&self) -> BookshelfRepository<'_> {
        BookshelfRepository::new(self)
    }

    pub fn user_books(&self) -> UserBookRepository<'_> {
        UserBookRepository::new(self)
    }

    pub fn book_readings(&self) -> BookReadingRepository<'_> {
        BookReadingRepository::new(self)
    }

    pub fn borrowings(&self) -> BorrowingRepository<'_> {
        BorrowingRepository::new(self)
    }

    pub fn quotes(&self) -> QuoteRepository<'_> {
        QuoteRepository::new(self)
    }

    pub fn collections(&self) -> CollectionRepository<'_> {
        CollectionRepository::new(self)
    }
}
