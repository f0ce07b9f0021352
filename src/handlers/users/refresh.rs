use super::*;

pub const COMMAND: &str = "users.refresh";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub refresh_token: String,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["refreshToken"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let tokens = auth::refresh(ctx.db(), &input.refresh_token, ctx.tokens())?
        .ok_or_else(|| HandlerError::Unauthorized("invalid or expired refresh token".into()))?;
    to_value(tokens)
}
