use super::*;

pub const COMMAND: &str = "borrowings.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<ScopedIdInput>()?;
    load_owned(ctx, input.id, input.user_book_id)?;
    ctx.db().borrowings().delete(input.id)?;
    Ok(json!({ "id": input.id }))
}
