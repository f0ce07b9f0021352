use super::*;

pub const COMMAND: &str = "quotes.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub book_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["bookId", "content"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let book = ctx
        .db()
        .books()
        .find_details(input.book_id)?
        .filter(|book| book.is_approved || book.created_by == Some(user_id))
        .ok_or_else(|| HandlerError::NotFound(format!("book {}", input.book_id)))?;

    let mut quote = Quote::create(user_id, book.id, input.content, input.page, input.is_favorite)?;
    ctx.db().commit(&mut quote)?;
    to_value(view(ctx.db(), quote.entity.id())?)
}
