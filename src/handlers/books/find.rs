use super::*;

pub const COMMAND: &str = "books.find";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

/// Unapproved books are visible to admins and to the user who added them.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let book = details(ctx.db(), input.id)?;
    if !book.is_approved && !ctx.is_admin() && book.created_by != Some(ctx.user_id()?) {
        return Err(HandlerError::NotFound(format!("book {}", input.id)));
    }
    to_value(book)
}
