use super::*;

pub const COMMAND: &str = "borrowings.find_many";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub user_book_id: Option<Uuid>,
    #[serde(default, deserialize_with = "params::opt_bool")]
    pub is_open: Option<bool>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    if let Some(user_book_id) = input.user_book_id {
        load_owned_user_book(ctx, user_book_id)?;
    }

    let query = BorrowingQuery {
        user_book_id: input.user_book_id,
        user_id: Some(user_id),
        is_open: input.is_open,
    };
    to_value(ctx.db().borrowings().find_many(&query, input.page.pagination())?)
}
