use super::*;

pub const COMMAND: &str = "book_change_requests.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

/// Rejecting (admin) and withdrawing (author of the request) both delete it.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let request = load(ctx.db().book_change_requests(), "book change request", input.id)?;
    if !ctx.is_admin() {
        ctx.ensure_owner(request.user_id())?;
    }

    ctx.db().book_change_requests().delete(input.id)?;
    Ok(json!({ "id": input.id }))
}
