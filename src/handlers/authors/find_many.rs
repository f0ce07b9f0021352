use super::*;

pub const COMMAND: &str = "authors.find_many";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "params::opt_bool")]
    pub is_approved: Option<bool>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

/// Regular users only ever see approved authors.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let is_approved = if ctx.is_admin() {
        input.is_approved
    } else {
        Some(true)
    };
    let query = AuthorQuery {
        name: input.name,
        is_approved,
        ids: None,
    };
    to_value(ctx.db().authors().find_many(&query, input.page.pagination())?)
}
