use super::*;

pub const COMMAND: &str = "book_change_requests.find_many";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub book_id: Option<Uuid>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

/// Admins see every request; users see their own.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let caller = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let user_id = if ctx.is_admin() {
        input.user_id
    } else {
        Some(caller)
    };

    let query = BookChangeRequestQuery {
        user_id,
        book_id: input.book_id,
    };
    to_value(
        ctx.db()
            .book_change_requests()
            .find_many(&query, input.page.pagination())?,
    )
}
