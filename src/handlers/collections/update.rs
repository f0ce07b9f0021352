use super::*;

pub const COMMAND: &str = "collections.update";

#[derive(Deserialize)]
pub struct Input {
    pub id: Uuid,
    pub name: String,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id", "name"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let mut collection = load_owned(ctx, input.id)?;
    collection.set_name(input.name)?;
    ctx.db().commit(&mut collection)?;
    to_value(view(ctx.db(), input.id)?)
}
