//! Relational in-memory store with optional snapshot persistence.

mod database;
mod error;
mod pagination;
pub mod snapshot;
mod tables;

pub use database::Database;
pub use error::RepositoryError;
pub use pagination::{PageMetadata, Paginated, Pagination, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use tables::{
    ensure_unique, AuthorRow, BookChangeRequestRow, BookReadingRow, BookRow, BookshelfRow,
    BorrowingRow, CategoryRow, CollectionRow, GenreRow, Links, QuoteRow, Row, Table, Tables,
    TokenKind, TokenRow, UserBookRow, UserRow,
};
