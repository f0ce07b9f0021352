use super::*;

pub const COMMAND: &str = "book_change_requests.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub book_id: Uuid,
    #[serde(flatten)]
    pub changes: BookChanges,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["bookId"])
}

/// Records only the proposed fields that differ from the current book.
/// Unapproved books are only open to their creator and admins.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let book = Some(load(ctx.db().books(), "book", input.book_id)?)
        .filter(|book| ctx.is_admin() || book.is_approved() || book.created_by() == Some(user_id))
        .ok_or_else(|| HandlerError::NotFound(format!("book {}", input.book_id)))?;
    ensure_references(ctx, &input.changes)?;

    let mut request = BookChangeRequest::propose(&book, &input.changes, user_id)?;
    ctx.db().commit(&mut request)?;

    let view = ctx
        .db()
        .book_change_requests()
        .find_view(request.entity.id())?
        .ok_or_else(|| HandlerError::NotFound(format!("book change request {}", request.entity.id())))?;
    to_value(view)
}

/// A proposal may only point at an existing category and existing authors.
fn ensure_references(ctx: &Context<Library>, changes: &BookChanges) -> Result<(), HandlerError> {
    if let Some(category_id) = changes.category_id {
        if !ctx.db().categories().missing(&[category_id])?.is_empty() {
            return Err(HandlerError::NotFound(format!("category {}", category_id)));
        }
    }
    if let Some(author_ids) = &changes.author_ids {
        let missing = ctx.db().authors().missing(author_ids)?;
        if let Some(author_id) = missing.first() {
            return Err(HandlerError::NotFound(format!("author {}", author_id)));
        }
    }
    Ok(())
}
