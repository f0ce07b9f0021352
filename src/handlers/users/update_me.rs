use super::*;

pub const COMMAND: &str = "users.update_me";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub current_password: Option<String>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_any_field(&["name", "password"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let user_id = ctx.user_id()?;
    let mut user = ctx
        .db()
        .users()
        .find_by_id(user_id)?
        .ok_or_else(|| HandlerError::NotFound(format!("user {}", user_id)))?;

    if let Some(name) = input.name {
        user.set_name(name)?;
    }
    if let Some(password) = input.password {
        let current = input.current_password.unwrap_or_default();
        if !auth::verify_password(&current, user.password_hash()) {
            return Err(OperationNotValidError::field(
                "currentPassword",
                "current password is incorrect",
            )
            .into());
        }
        validation::password(&password)?;
        user.set_password_hash(auth::hash_password(&password)?);
    }

    ctx.db().commit(&mut user)?;
    to_value(view(ctx.db(), user_id)?)
}
