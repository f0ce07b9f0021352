use super::*;

pub const COMMAND: &str = "users.login";

#[derive(Deserialize)]
pub struct Input {
    pub email: String,
    pub password: String,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["email", "password"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let rejected = || HandlerError::Unauthorized("invalid email or password".into());

    let user = ctx
        .db()
        .users()
        .find_by_email(&input.email)?
        .ok_or_else(rejected)?;
    if !auth::verify_password(&input.password, user.password_hash()) {
        return Err(rejected());
    }

    let tokens = auth::issue_pair(ctx.db(), user.entity.id(), ctx.tokens())?;
    let mut body = to_value(tokens)?;
    body["user"] = to_value(view(ctx.db(), user.entity.id())?)?;
    Ok(body)
}
