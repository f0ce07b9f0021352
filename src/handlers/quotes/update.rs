use super::*;

pub const COMMAND: &str = "quotes.update";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: Uuid,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub page: Option<Option<String>>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"])
        && (ctx.has_any_field(&["content", "isFavorite"]) || ctx.raw_input().get("page").is_some())
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let mut quote = load_owned(ctx, input.id)?;

    if let Some(content) = input.content {
        quote.set_content(content)?;
    }
    if let Some(page) = input.page {
        quote.set_page(page)?;
    }
    if let Some(is_favorite) = input.is_favorite {
        quote.set_favorite(is_favorite);
    }

    ctx.db().commit(&mut quote)?;
    to_value(view(ctx.db(), input.id)?)
}
