//! Author handlers. Authors proposed by regular users start unapproved.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::Author;
use crate::library::Library;
use crate::microsvc::{params, Context, HandlerError};
use crate::repository::{AuthorQuery, AuthorView};
use crate::store::Database;

use super::{load, to_value, IdInput, PageInput};

pub mod create;
pub mod delete;
pub mod find_many;
pub mod update;

fn view(db: &Database, id: uuid::Uuid) -> Result<AuthorView, HandlerError> {
    db.authors()
        .find_view(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("author {}", id)))
}
