//! Reading history of a user book.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::BookReading;
use crate::library::Library;
use crate::microsvc::{Context, HandlerError};
use crate::repository::{BookReadingQuery, BookReadingView};
use crate::store::Database;

use super::user_books::load_owned as load_owned_user_book;
use super::{load, nullable, to_value, PageInput, ScopedIdInput};

pub mod create;
pub mod delete;
pub mod find_many;
pub mod update;

fn view(db: &Database, id: Uuid) -> Result<BookReadingView, HandlerError> {
    db.book_readings()
        .find_view(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("book reading {}", id)))
}

/// Load a book reading whose user book the caller owns. A `user_book_id` scope
/// that does not match hides the record.
fn load_owned(
    ctx: &Context<Library>,
    id: Uuid,
    user_book_id: Option<Uuid>,
) -> Result<BookReading, HandlerError> {
    let reading = load(ctx.db().book_readings(), "book reading", id)?;
    if user_book_id.is_some_and(|scope| scope != reading.user_book_id()) {
        return Err(HandlerError::NotFound(format!("book reading {}", id)));
    }
    load_owned_user_book(ctx, reading.user_book_id())?;
    Ok(reading)
}
