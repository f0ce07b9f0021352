use super::*;

pub const COMMAND: &str = "bookshelves.find_many";

#[derive(Deserialize)]
pub struct Input {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub bookshelf_type: Option<BookshelfType>,
    #[serde(flatten)]
    pub page: PageInput,
}

pub fn guard(_ctx: &Context<Library>) -> bool {
    true
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let query = BookshelfQuery {
        user_id: Some(user_id),
        name: input.name,
        bookshelf_type: input.bookshelf_type,
    };
    to_value(ctx.db().bookshelves().find_many(&query, input.page.pagination())?)
}
