//! Bookshelf handlers. Every shelf is private to its owner.

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::{Bookshelf, BookshelfType};
use crate::library::Library;
use crate::microsvc::{Context, HandlerError};
use crate::repository::{BookshelfQuery, BookshelfView};
use crate::store::Database;

use super::{load, nullable, to_value, IdInput, PageInput};

pub mod create;
pub mod delete;
pub mod find;
pub mod find_many;
pub mod update;

fn view(db: &Database, id: Uuid) -> Result<BookshelfView, HandlerError> {
    db.bookshelves()
        .find_view(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("bookshelf {}", id)))
}

/// Load a shelf the caller owns.
pub(crate) fn load_owned(ctx: &Context<Library>, id: Uuid) -> Result<Bookshelf, HandlerError> {
    let bookshelf = load(ctx.db().bookshelves(), "bookshelf", id)?;
    ctx.ensure_owner(bookshelf.user_id())?;
    Ok(bookshelf)
}
