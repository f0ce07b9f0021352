//! Account handlers: registration, tokens, profile and administration.

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth;
use crate::domain::{validation, Bookshelf, OperationNotValidError, Role, User};
use crate::entity::Persist;
use crate::library::Library;
use crate::microsvc::{Context, HandlerError};
use crate::repository::{FindById, UserQuery, UserView};
use crate::store::Database;

use super::{to_value, IdInput, PageInput};

pub mod delete;
pub mod find_many;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod update_me;

fn view(db: &Database, id: Uuid) -> Result<UserView, HandlerError> {
    db.users()
        .find_view(id)?
        .ok_or_else(|| HandlerError::NotFound(format!("user {}", id)))
}
