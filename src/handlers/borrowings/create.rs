use super::*;

pub const COMMAND: &str = "borrowings.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub user_book_id: Uuid,
    pub borrower: String,
    pub started_at: NaiveDate,
    #[serde(default)]
    pub ended_at: Option<NaiveDate>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["userBookId", "borrower", "startedAt"])
}

/// A user book has at most one open borrowing; a second one is a conflict.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    load_owned_user_book(ctx, input.user_book_id)?;

    let mut borrowing = Borrowing::create(
        input.user_book_id,
        input.borrower,
        input.started_at,
        input.ended_at,
    )?;
    ctx.db().commit(&mut borrowing)?;
    to_value(view(ctx.db(), borrowing.entity.id())?)
}
