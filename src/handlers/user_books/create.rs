use super::*;

pub const COMMAND: &str = "user_books.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub book_id: Uuid,
    pub bookshelf_id: Uuid,
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub collection_ids: Vec<Uuid>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["bookId", "bookshelfId"])
}

/// A user holds at most one copy of each book.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;

    load_owned_bookshelf(ctx, input.bookshelf_id)?;
    ensure_own_collections(ctx, &input.collection_ids)?;

    let book = ctx
        .db()
        .books()
        .find_details(input.book_id)?
        .filter(|book| book.is_approved || book.created_by == Some(user_id))
        .ok_or_else(|| HandlerError::NotFound(format!("book {}", input.book_id)))?;

    let mut user_book = UserBook::create(NewUserBook {
        user_id,
        book_id: book.id,
        bookshelf_id: input.bookshelf_id,
        status: input.status.unwrap_or(ReadingStatus::ToRead),
        is_favorite: input.is_favorite,
        image_url: input.image_url,
        collection_ids: input.collection_ids,
    })?;
    ctx.db().commit(&mut user_book)?;

    to_value(view(ctx.db(), user_book.entity.id())?)
}
