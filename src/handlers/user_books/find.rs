use super::*;

pub const COMMAND: &str = "user_books.find";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let user_book = view(ctx.db(), input.id)?;
    ctx.ensure_owner(user_book.user_id)?;
    to_value(user_book)
}
