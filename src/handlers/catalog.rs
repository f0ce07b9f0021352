//! Category and genre handlers. Only admins extend the catalog.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Category, Genre};
use crate::library::Library;
use crate::microsvc::{Context, HandlerError};
use crate::repository::CatalogView;

use super::{to_value, PageInput};

#[derive(Deserialize)]
pub struct CreateInput {
    pub name: String,
}

#[derive(Deserialize)]
pub struct FindManyInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub mod create_category {
    use super::*;

    pub const COMMAND: &str = "categories.create";

    pub fn guard(ctx: &Context<Library>) -> bool {
        ctx.has_fields(&["name"])
    }

    pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
        ctx.require_admin()?;
        let input = ctx.input::<CreateInput>()?;
        let mut category = Category::create(input.name)?;
        ctx.db().commit(&mut category)?;
        to_value(CatalogView {
            id: category.entity.id(),
            name: category.name().to_string(),
        })
    }
}

pub mod find_categories {
    use super::*;

    pub const COMMAND: &str = "categories.find_many";

    pub fn guard(_ctx: &Context<Library>) -> bool {
        true
    }

    pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
        let input = ctx.input::<FindManyInput>()?;
        to_value(
            ctx.db()
                .categories()
                .find_many(input.name.as_deref(), input.page.pagination())?,
        )
    }
}

pub mod create_genre {
    use super::*;

    pub const COMMAND: &str = "genres.create";

    pub fn guard(ctx: &Context<Library>) -> bool {
        ctx.has_fields(&["name"])
    }

    pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
        ctx.require_admin()?;
        let input = ctx.input::<CreateInput>()?;
        let mut genre = Genre::create(input.name)?;
        ctx.db().commit(&mut genre)?;
        to_value(CatalogView {
            id: genre.entity.id(),
            name: genre.name().to_string(),
        })
    }
}

pub mod find_genres {
    use super::*;

    pub const COMMAND: &str = "genres.find_many";

    pub fn guard(_ctx: &Context<Library>) -> bool {
        true
    }

    pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
        let input = ctx.input::<FindManyInput>()?;
        to_value(
            ctx.db()
                .genres()
                .find_many(input.name.as_deref(), input.page.pagination())?,
        )
    }
}
