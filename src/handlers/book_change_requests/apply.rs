use super::*;

pub const COMMAND: &str = "book_change_requests.apply";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

/// Copy the requested fields onto the book and drop the request, in one commit.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<IdInput>()?;
    let mut request = load(ctx.db().book_change_requests(), "book change request", input.id)?;
    let mut book = load(ctx.db().books(), "book", request.book_id())?;

    request.apply_to(&mut book)?;

    let mut batch: [&mut dyn Persist; 2] = [&mut book, &mut request];
    ctx.db().commit(&mut batch)?;

    let details = ctx
        .db()
        .books()
        .find_details(book.entity.id())?
        .ok_or_else(|| HandlerError::NotFound(format!("book {}", book.entity.id())))?;
    to_value(details)
}
