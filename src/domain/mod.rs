//! Domain entities and the rules they enforce.
//!
//! Every mutable entity wraps an [`Entity`](crate::entity::Entity) and records
//! a domain action for each effective change. Setting a field to its current
//! value records nothing; structurally invalid changes (a duplicate author, a
//! missing collection, an inverted date range) fail with
//! [`OperationNotValidError`].

pub mod author;
pub mod book;
pub mod book_change_request;
pub mod book_reading;
pub mod bookshelf;
pub mod borrowing;
pub mod catalog;
pub mod collection;
pub mod diff;
pub mod error;
pub mod quote;
pub mod user;
pub mod user_book;
pub mod validation;

pub use author::{Author, AuthorAction};
pub use book::{Book, BookAction, BookChanges, BookFormat, NewBook};
pub use book_change_request::{BookChangeRequest, BookChangeRequestAction};
pub use book_reading::{BookReading, BookReadingAction};
pub use bookshelf::{Bookshelf, BookshelfAction, BookshelfType};
pub use borrowing::{Borrowing, BorrowingAction};
pub use catalog::{CatalogAction, Category, Genre};
pub use collection::{Collection, CollectionAction};
pub use diff::{reconcile, Diff};
pub use error::{DomainResult, OperationNotValidError};
pub use quote::{Quote, QuoteAction};
pub use user::{Role, User, UserAction};
pub use user_book::{NewUserBook, ReadingStatus, UserBook, UserBookAction};
