//! Lending a user book to someone else.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::Borrowing;
use crate::library::Library;
use crate::microsvc::{params, Context, HandlerError};
use crate::repository::{BorrowingQuery, BorrowingView};
use crate::store::Database;

use super::user_books::load_owned as load_owned_user_book;
use super::{load, nullable, to_value, PageInput, ScopedIdInput};

pub mod create;
pub mod delete;
pub mod find_many;
pub mod update;

fn view(db: &Database, id: Uuid) -> Result<BorrowingView, HandlerError> {
    db.borrowings()
        .find_view(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("borrowing {}", id)))
}

/// Load a borrowing whose user book the caller owns. A `user_book_id` scope
/// that does not match hides the record.
fn load_owned(
    ctx: &Context<Library>,
    id: Uuid,
    user_book_id: Option<Uuid>,
) -> Result<Borrowing, HandlerError> {
    let borrowing = load(ctx.db().borrowings(), "borrowing", id)?;
    if user_book_id.is_some_and(|scope| scope != borrowing.user_book_id()) {
        return Err(HandlerError::NotFound(format!("borrowing {}", id)));
    }
    load_owned_user_book(ctx, borrowing.user_book_id())?;
    Ok(borrowing)
}
