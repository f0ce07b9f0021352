//! Named, user-defined groupings of user books.

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::Collection;
use crate::library::Library;
use crate::microsvc::{Context, HandlerError};
use crate::repository::{CollectionQuery, CollectionView};
use crate::store::Database;

use super::{load, to_value, IdInput, PageInput};

pub mod create;
pub mod delete;
pub mod find_many;
pub mod update;

fn view(db: &Database, id: Uuid) -> Result<CollectionView, HandlerError> {
    db.collections()
        .find_view(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("collection {}", id)))
}

fn load_owned(ctx: &Context<Library>, id: Uuid) -> Result<Collection, HandlerError> {
    let collection = load(ctx.db().collections(), "collection", id)?;
    ctx.ensure_owner(collection.user_id())?;
    Ok(collection)
}
