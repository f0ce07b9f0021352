//! Handlers for proposed book edits and their moderation.

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::{BookChangeRequest, BookChanges};
use crate::entity::Persist;
use crate::library::Library;
use crate::microsvc::{Context, HandlerError};
use crate::repository::BookChangeRequestQuery;

use super::{load, to_value, IdInput, PageInput};

pub mod apply;
pub mod create;
pub mod delete;
pub mod find_many;
