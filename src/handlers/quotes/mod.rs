//! Quotes users keep from the books they read.

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::Quote;
use crate::library::Library;
use crate::microsvc::{params, Context, HandlerError};
use crate::repository::{QuoteQuery, QuoteView};
use crate::store::Database;

use super::{load, nullable, to_value, IdInput, PageInput};

pub mod create;
pub mod delete;
pub mod find_many;
pub mod update;

fn view(db: &Database, id: Uuid) -> Result<QuoteView, HandlerError> {
    db.quotes()
        .find_view(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("quote {}", id)))
}

fn load_owned(ctx: &Context<Library>, id: Uuid) -> Result<Quote, HandlerError> {
    let quote = load(ctx.db().quotes(), "quote", id)?;
    ctx.ensure_owner(quote.user_id())?;
    Ok(quote)
}
