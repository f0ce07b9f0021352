use super::*;

pub const COMMAND: &str = "books.find_many";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub genre_id: Option<Uuid>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "params::opt_i32")]
    pub release_year_from: Option<i32>,
    #[serde(default, deserialize_with = "params::opt_i32")]
    pub release_year_to: Option<i32>,
    #[serde(default, deserialize_with = "params::opt_bool")]
    pub is_approved: Option<bool>,
    #[serde(default)]
    pub sort: Option<BookSort>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let is_approved = if ctx.is_admin() {
        input.is_approved
    } else {
        Some(true)
    };

    let query = BookQuery {
        search: input.search,
        title: input.title,
        isbn: input.isbn,
        author_id: input.author_id,
        category_id: input.category_id,
        genre_id: input.genre_id,
        language: input.language,
        release_year_from: input.release_year_from,
        release_year_to: input.release_year_to,
        is_approved,
        sort: input.sort.unwrap_or_default(),
        order: input.order.unwrap_or_default(),
    };
    to_value(ctx.db().books().find_many(&query, input.page.pagination())?)
}
