use super::*;

pub const COMMAND: &str = "bookshelves.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["name"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let mut bookshelf =
        Bookshelf::create(user_id, input.name, BookshelfType::Standard, input.image_url)?;
    ctx.db().commit(&mut bookshelf)?;
    to_value(view(ctx.db(), bookshelf.entity.id())?)
}
