//! Catalog book handlers.

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::{Book, BookFormat, NewBook};
use crate::library::Library;
use crate::microsvc::{params, Context, HandlerError};
use crate::repository::{BookDetails, BookQuery, BookSort};
use crate::store::{Database, SortOrder};

use super::{load, nullable, to_value, IdInput, PageInput};

pub mod create;
pub mod delete;
pub mod find;
pub mod find_many;
pub mod update;

fn details(db: &Database, id: Uuid) -> Result<BookDetails, HandlerError> {
    db.books()
        .find_details(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("book {}", id)))
}
