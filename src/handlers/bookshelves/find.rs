use super::*;

pub const COMMAND: &str = "bookshelves.find";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let bookshelf = view(ctx.db(), input.id)?;
    ctx.ensure_owner(bookshelf.user_id)?;
    to_value(bookshelf)
}
