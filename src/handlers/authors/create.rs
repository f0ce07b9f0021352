use super::*;

pub const COMMAND: &str = "authors.create";

#[derive(Deserialize)]
pub struct Input {
    pub name: String,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["name"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    ctx.user_id()?;
    let input = ctx.input::<Input>()?;
    let mut author = Author::create(input.name, ctx.is_admin())?;
    ctx.db().commit(&mut author)?;
    to_value(view(ctx.db(), author.entity.id())?)
}
