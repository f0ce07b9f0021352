use super::*;

pub const COMMAND: &str = "collections.find_many";

#[derive(Deserialize)]
pub struct Input {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let query = CollectionQuery {
        user_id: Some(user_id),
        name: input.name,
    };
    to_value(ctx.db().collections().find_many(&query, input.page.pagination())?)
}
