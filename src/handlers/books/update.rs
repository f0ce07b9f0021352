use super::*;

pub const COMMAND: &str = "books.update";

const FIELDS: &[&str] = &[
    "title",
    "isbn",
    "publisher",
    "releaseYear",
    "language",
    "translator",
    "format",
    "pages",
    "imageUrl",
    "categoryId",
    "isApproved",
    "authorIds",
    "genreIds",
];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub translator: Option<Option<String>>,
    #[serde(default)]
    pub format: Option<BookFormat>,
    #[serde(default, deserialize_with = "nullable")]
    pub pages: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub is_approved: Option<bool>,
    #[serde(default)]
    pub author_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub genre_ids: Option<Vec<Uuid>>,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["id"]) && FIELDS.iter().any(|field| ctx.raw_input().get(*field).is_some())
}

/// Only fields that differ from the stored book are written.
pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<Input>()?;
    let mut book = load(ctx.db().books(), "book", input.id)?;

    if let Some(title) = input.title {
        book.set_title(title)?;
    }
    if let Some(isbn) = input.isbn {
        book.set_isbn(&isbn)?;
    }
    if let Some(publisher) = input.publisher {
        book.set_publisher(publisher)?;
    }
    if let Some(year) = input.release_year {
        book.set_release_year(year)?;
    }
    if let Some(language) = input.language {
        book.set_language(language)?;
    }
    if let Some(translator) = input.translator {
        book.set_translator(translator)?;
    }
    if let Some(format) = input.format {
        book.set_format(format);
    }
    if let Some(pages) = input.pages {
        book.set_pages(pages)?;
    }
    if let Some(image_url) = input.image_url {
        book.set_image_url(image_url)?;
    }
    if let Some(category_id) = input.category_id {
        book.set_category(category_id);
    }
    if let Some(is_approved) = input.is_approved {
        book.set_approved(is_approved);
    }
    if let Some(author_ids) = input.author_ids {
        book.set_authors(&author_ids)?;
    }
    if let Some(genre_ids) = input.genre_ids {
        book.set_genres(&genre_ids)?;
    }

    ctx.db().commit(&mut book)?;
    to_value(details(ctx.db(), input.id)?)
}
