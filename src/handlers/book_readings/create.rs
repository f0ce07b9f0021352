use super::*;

pub const COMMAND: &str = "book_readings.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub user_book_id: Uuid,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub comment: Option<String>,
    pub started_at: NaiveDate,
    #[serde(default)]
    pub ended_at: Option<NaiveDate>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["userBookId", "startedAt"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    load_owned_user_book(ctx, input.user_book_id)?;

    let mut reading = BookReading::create(
        input.user_book_id,
        input.rating,
        input.comment,
        input.started_at,
        input.ended_at,
    )?;
    ctx.db().commit(&mut reading)?;
    to_value(view(ctx.db(), reading.entity.id())?)
}
