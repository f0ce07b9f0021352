use super::*;

pub const COMMAND: &str = "users.logout";

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

/// Revokes every token of the caller, on all devices.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let revoked = ctx.db().users().revoke_user_tokens(ctx.user_id()?)?;
    Ok(json!({ "revoked": revoked }))
}
