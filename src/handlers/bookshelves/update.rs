use super::*;

pub const COMMAND: &str = "bookshelves.update";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
        && (ctx.has_field("name") || ctx.raw_input().get("imageUrl").is_some())
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let mut bookshelf = load_owned(ctx, input.id)?;

    if let Some(name) = input.name {
        bookshelf.set_name(name)?;
    }
    if let Some(image_url) = input.image_url {
        bookshelf.set_image_url(image_url)?;
    }

    ctx.db().commit(&mut bookshelf)?;
    to_value(view(ctx.db(), input.id)?)
}
