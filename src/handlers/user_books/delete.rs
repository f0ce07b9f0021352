use super::*;

pub const COMMAND: &str = "user_books.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

/// Readings, borrowings and collection links go with the user book.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    load_owned(ctx, input.id)?;
    ctx.db().user_books().delete(input.id)?;
    Ok(json!({ "id": input.id }))
}
