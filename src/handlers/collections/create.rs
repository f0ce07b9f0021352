use super::*;

pub const COMMAND: &str = "collections.create";

#[derive(Deserialize)]
pub struct Input {
    pub name: String,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["name"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let user_id = ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let mut collection = Collection::create(user_id, input.name)?;
    ctx.db().commit(&mut collection)?;
    to_value(view(ctx.db(), collection.entity.id())?)
}
