use super::*;

pub const COMMAND: &str = "users.delete";

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
}

/// Users may delete their own account; admins may delete anyone's.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    if ctx.user_id()? != input.id {
        ctx.require_admin()?;
    }

    if !ctx.db().users().delete(input.id)? {
        return Err(HandlerError::NotFound(format!("user {}", input.id)));
    }
    Ok(json!({ "id": input.id }))
}
