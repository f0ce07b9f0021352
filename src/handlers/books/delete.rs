use super::*;

pub const COMMAND: &str = "books.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<IdInput>()?;
    if !ctx.db().books().delete(input.id)? {
        return Err(HandlerError::NotFound(format!("book {}", input.id)));
    }
    Ok(json!({ "id": input.id }))
}
