use super::*;

pub const COMMAND: &str = "users.me";

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    to_value(view(ctx.db(), ctx.user_id()?)?)
}
