//! Handlers for a user's own copies of catalog books.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::{BookshelfType, NewUserBook, ReadingStatus, UserBook};
use crate::entity::Persist;
use crate::library::Library;
use crate::microsvc::{params, Context, HandlerError};
use crate::repository::{UserBookQuery, UserBookSort, UserBookView};
use crate::store::{Database, SortOrder};

use super::bookshelves::load_owned as load_owned_bookshelf;
use super::{load, nullable, to_value, IdInput, PageInput};

pub mod create;
pub mod delete;
pub mod find;
pub mod find_many;
pub mod update;

fn view(db: &Database, id: Uuid) -> Result<UserBookView, HandlerError> {
    db.user_books()
        .find_details(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("user book {}", id)))
}

/// Load a user book the caller owns.
pub(crate) fn load_owned(ctx: &Context<Library>, id: Uuid) -> Result<UserBook, HandlerError> {
    let user_book = load(ctx.db().user_books(), "user book", id)?;
    ctx.ensure_owner(user_book.user_id())?;
    Ok(user_book)
}

/// Every collection must exist and belong to the caller.
fn ensure_own_collections(ctx: &Context<Library>, ids: &[Uuid]) -> Result<(), HandlerError> {
    let foreign = ctx.db().collections().foreign(ctx.user_id()?, ids)?;
    match foreign.first() {
        Some(id) => Err(HandlerError::NotFound(format!("collection {}", id))),
        None => Ok(()),
    }
}
