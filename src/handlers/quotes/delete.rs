use super::*;

pub const COMMAND: &str = "quotes.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    load_owned(ctx, input.id)?;
    ctx.db().quotes().delete(input.id)?;
    Ok(json!({ "id": input.id }))
}
