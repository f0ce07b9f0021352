use super::*;

pub const COMMAND: &str = "book_readings.find_many";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub user_book_id: Option<Uuid>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

/// Newest first. Without a user book, lists every reading of the caller.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    if let Some(user_book_id) = input.user_book_id {
        load_owned_user_book(ctx, user_book_id)?;
    }

    let query = BookReadingQuery {
        user_book_id: input.user_book_id,
        user_id: Some(user_id),
    };
    to_value(ctx.db().book_readings().find_many(&query, input.page.pagination())?)
}
