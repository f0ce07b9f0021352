use super::*;

pub const COMMAND: &str = "users.find_many";

#[derive(Deserialize)]
pub struct Input {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<Input>()?;
    let query = UserQuery {
        email: input.email,
        name: input.name,
        role: input.role,
    };
    to_value(ctx.db().users().find_many(&query, input.page.pagination())?)
}
