use super::*;

pub const COMMAND: &str = "user_books.update";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: Uuid,
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub bookshelf_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub collection_ids: Option<Vec<Uuid>>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
        && (ctx.has_any_field(&["status", "isFavorite", "bookshelfId", "collectionIds"])
            || ctx.raw_input().get("imageUrl").is_some())
}

/// Moving a book off the Borrowing shelf closes its open borrowing in the
/// same commit.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let mut user_book = load_owned(ctx, input.id)?;

    if let Some(status) = input.status {
        user_book.set_status(status);
    }
    if let Some(is_favorite) = input.is_favorite {
        user_book.set_favorite(is_favorite);
    }
    if let Some(image_url) = input.image_url {
        user_book.set_image_url(image_url)?;
    }
    if let Some(collection_ids) = input.collection_ids {
        ensure_own_collections(ctx, &collection_ids)?;
        user_book.set_collections(&collection_ids)?;
    }

    let mut returned = None;
    if let Some(bookshelf_id) = input.bookshelf_id {
        load_owned_bookshelf(ctx, bookshelf_id)?;
        if let Some(previous) = user_book.move_to(bookshelf_id) {
            let previous = load(ctx.db().bookshelves(), "bookshelf", previous)?;
            if previous.bookshelf_type() == BookshelfType::Borrowing {
                returned = ctx.db().borrowings().find_open(input.id)?;
            }
        }
    }

    match returned.as_mut() {
        Some(borrowing) => {
            borrowing.close(Utc::now().date_naive())?;
            let mut batch: [&mut dyn Persist; 2] = [&mut user_book, borrowing];
            ctx.db().commit(&mut batch)?;
        }
        None => ctx.db().commit(&mut user_book)?,
    }

    to_value(view(ctx.db(), input.id)?)
}
