use super::*;

pub const COMMAND: &str = "authors.update";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: uuid::Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_approved: Option<bool>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"]) && ctx.has_any_field(&["name", "isApproved"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<Input>()?;
    let mut author = load(ctx.db().authors(), "author", input.id)?;

    if let Some(name) = input.name {
        author.set_name(name)?;
    }
    if let Some(is_approved) = input.is_approved {
        author.set_approved(is_approved);
    }

    ctx.db().commit(&mut author)?;
    to_value(view(ctx.db(), input.id)?)
}
