use super::*;

pub const COMMAND: &str = "quotes.find_many";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub book_id: Option<Uuid>,
    #[serde(default, deserialize_with = "params::opt_bool")]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let query = QuoteQuery {
        user_id: Some(user_id),
        book_id: input.book_id,
        is_favorite: input.is_favorite,
        content: input.content,
    };
    to_value(ctx.db().quotes().find_many(&query, input.page.pagination())?)
}
