//! Command handlers, one module per use case.
//!
//! Every handler module follows the microsvc convention (`COMMAND`, `guard`,
//! `handle`) and is registered on the service by [`service`].

use serde::Deserialize;
use uuid::Uuid;

use crate::library::Library;
use crate::microsvc::{params, HandlerError, Service};
use crate::repository::FindById;
use crate::store::Pagination;

pub mod authors;
pub mod book_change_requests;
pub mod book_readings;
pub mod books;
pub mod bookshelves;
pub mod borrowings;
pub mod catalog;
pub mod collections;
pub mod quotes;
pub mod user_books;
pub mod users;

/// Build the service with every library command registered.
pub fn service(library: Library) -> Service<Library> {
    crate::register_handlers!(
        Service::new(library),
        users::register,
        users::login,
        users::refresh,
        users::logout,
        users::me,
        users::update_me,
        users::delete,
        users::find_many,
        authors::create,
        authors::find_many,
        authors::update,
        authors::delete,
        catalog::create_category,
        catalog::find_categories,
        catalog::create_genre,
        catalog::find_genres,
        books::create,
        books::find,
        books::find_many,
        books::update,
        books::delete,
        book_change_requests::create,
        book_change_requests::find_many,
        book_change_requests::apply,
        book_change_requests::delete,
        bookshelves::create,
        bookshelves::find,
        bookshelves::find_many,
        bookshelves::update,
        bookshelves::delete,
        user_books::create,
        user_books::find,
        user_books::find_many,
        user_books::update,
        user_books::delete,
        book_readings::create,
        book_readings::find_many,
        book_readings::update,
        book_readings::delete,
        borrowings::create,
        borrowings::find_many,
        borrowings::update,
        borrowings::delete,
        quotes::create,
        quotes::find_many,
        quotes::update,
        quotes::delete,
        collections::create,
        collections::find_many,
        collections::update,
        collections::delete,
    )
}

/// `page` / `pageSize` accepted by every `find_many` command.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    #[serde(default, deserialize_with = "params::opt_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "params::opt_u32")]
    pub page_size: Option<u32>,
}

impl PageInput {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_params(self.page, self.page_size)
    }
}

/// Input of commands addressing a single resource.
#[derive(Debug, Deserialize)]
pub struct IdInput {
    pub id: Uuid,
}

/// Input of commands addressing a record nested under a user book.
///
/// `userBookId` comes from the nested route and must match the record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedIdInput {
    pub id: Uuid,
    #[serde(default)]
    pub user_book_id: Option<Uuid>,
}

/// Load an aggregate or fail with `NotFound`.
pub(crate) fn load<F: FindById>(repo: F, what: &str, id: Uuid) -> Result<F::Aggregate, HandlerError> {
    repo.find_by_id(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("{} {}", what, id)))
}

/// Serialize a read model into the response body.
pub(crate) fn to_value<T: serde::Serialize>(view: T) -> Result<serde_json::Value, HandlerError> {
    Ok(serde_json::to_value(view)?)
}

/// Deserialize a field that may be absent, `null`, or a value.
///
/// `Some(None)` means the client cleared the field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
