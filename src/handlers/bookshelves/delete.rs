use super::*;

pub const COMMAND: &str = "bookshelves.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

/// Only empty standard shelves can go.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    load_owned(ctx, input.id)?;
    if !ctx.db().bookshelves().delete(input.id)? {
        return Err(HandlerError::NotFound(format!("bookshelf {}", input.id)));
    }
    Ok(json!({ "id": input.id }))
}
