use super::*;

pub const COMMAND: &str = "books.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub release_year: i32,
    pub language: String,
    #[serde(default)]
    pub translator: Option<String>,
    pub format: BookFormat,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: Uuid,
    pub author_ids: Vec<Uuid>,
    #[serde(default)]
    pub genre_ids: Vec<Uuid>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&[
        "title",
        "isbn",
        "publisher",
        "releaseYear",
        "language",
        "format",
        "categoryId",
        "authorIds",
    ])
}

/// Books added by regular users wait for an admin's approval.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;

    let mut book = Book::create(NewBook {
        title: input.title,
        isbn: input.isbn,
        publisher: input.publisher,
        release_year: input.release_year,
        language: input.language,
        translator: input.translator,
        format: input.format,
        pages: input.pages,
        image_url: input.image_url,
        category_id: input.category_id,
        is_approved: ctx.is_admin(),
        created_by: Some(user_id),
        author_ids: input.author_ids,
        genre_ids: input.genre_ids,
    })?;
    ctx.db().commit(&mut book)?;

    to_value(details(ctx.db(), book.entity.id())?)
}
