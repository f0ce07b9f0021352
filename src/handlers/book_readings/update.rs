use super::*;

pub const COMMAND: &str = "book_readings.update";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: Uuid,
    #[serde(default)]
    pub user_book_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    pub rating: Option<Option<u8>>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment: Option<Option<String>>,
    #[serde(default)]
    pub started_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    pub ended_at: Option<Option<NaiveDate>>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    let input = ctx.raw_input();
    ctx.has_fields(&["id"])
        && ["rating", "comment", "startedAt", "endedAt"]
            .iter()
            .any(|field| input.get(*field).is_some())
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let mut reading = load_owned(ctx, input.id, input.user_book_id)?;

    if let Some(rating) = input.rating {
        reading.set_rating(rating)?;
    }
    if let Some(comment) = input.comment {
        reading.set_comment(comment)?;
    }
    if input.started_at.is_some() || input.ended_at.is_some() {
        let started_at = input.started_at.unwrap_or(reading.started_at());
        let ended_at = input.ended_at.unwrap_or(reading.ended_at());
        reading.set_period(started_at, ended_at)?;
    }

    ctx.db().commit(&mut reading)?;
    to_value(view(ctx.db(), input.id)?)
}
