use super::*;

pub const COMMAND: &str = "user_books.find_many";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub bookshelf_id: Option<Uuid>,
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    #[serde(default, deserialize_with = "params::opt_bool")]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub collection_id: Option<Uuid>,
    /// Matches the book title or any author name.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sort: Option<UserBookSort>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let query = UserBookQuery {
        user_id: Some(user_id),
        bookshelf_id: input.bookshelf_id,
        status: input.status,
        is_favorite: input.is_favorite,
        collection_id: input.collection_id,
        title: input.title,
        sort: input.sort.unwrap_or_default(),
        order: input.order.unwrap_or_default(),
    };
    to_value(ctx.db().user_books().find_many(&query, input.page.pagination())?)
}
