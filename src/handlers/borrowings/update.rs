use super::*;

pub const COMMAND: &str = "borrowings.update";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: Uuid,
    #[serde(default)]
    pub user_book_id: Option<Uuid>,
    #[serde(default)]
    pub borrower: Option<String>,
    #[serde(default)]
    pub started_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    pub ended_at: Option<Option<NaiveDate>>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
        && (ctx.has_any_field(&["borrower", "startedAt"]) || ctx.raw_input().get("endedAt").is_some())
}

/// Reopening (clearing `endedAt`) conflicts with another open borrowing.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let mut borrowing = load_owned(ctx, input.id, input.user_book_id)?;

    if let Some(borrower) = input.borrower {
        borrowing.set_borrower(borrower)?;
    }
    if input.started_at.is_some() || input.ended_at.is_some() {
        let started_at = input.started_at.unwrap_or(borrowing.started_at());
        let ended_at = input.ended_at.unwrap_or(borrowing.ended_at());
        borrowing.set_period(started_at, ended_at)?;
    }

    ctx.db().commit(&mut borrowing)?;
    to_value(view(ctx.db(), input.id)?)
}
