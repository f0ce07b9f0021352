use super::*;

pub const COMMAND: &str = "collections.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

/// User books stay; only their links to the collection are removed.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    load_owned(ctx, input.id)?;
    ctx.db().collections().delete(input.id)?;
    Ok(json!({ "id": input.id }))
}
