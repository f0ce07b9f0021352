use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::diff::reconcile;
use super::error::{DomainResult, OperationNotValidError};
use super::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookFormat {
    Paperback,
    Hardcover,
    Ebook,
    Audiobook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookAction {
    UpdateTitle(String),
    UpdateIsbn(String),
    UpdatePublisher(String),
    UpdateReleaseYear(i32),
    UpdateLanguage(String),
    UpdateTranslator(Option<String>),
    UpdateFormat(BookFormat),
    UpdatePages(Option<u32>),
    UpdateImageUrl(Option<String>),
    UpdateCategory(Uuid),
    UpdateIsApproved(bool),
    AddAuthor(Uuid),
    DeleteAuthor(Uuid),
    AddGenre(Uuid),
    DeleteGenre(Uuid),
}

impl DomainAction for BookAction {
    fn action_type(&self) -> &'static str {
        match self {
            BookAction::UpdateTitle(_) => "UpdateTitle",
            BookAction::UpdateIsbn(_) => "UpdateIsbn",
            BookAction::UpdatePublisher(_) => "UpdatePublisher",
            BookAction::UpdateReleaseYear(_) => "UpdateReleaseYear",
            BookAction::UpdateLanguage(_) => "UpdateLanguage",
            BookAction::UpdateTranslator(_) => "UpdateTranslator",
            BookAction::UpdateFormat(_) => "UpdateFormat",
            BookAction::UpdatePages(_) => "UpdatePages",
            BookAction::UpdateImageUrl(_) => "UpdateImageUrl",
            BookAction::UpdateCategory(_) => "UpdateCategory",
            BookAction::UpdateIsApproved(_) => "UpdateIsApproved",
            BookAction::AddAuthor(_) => "AddAuthor",
            BookAction::DeleteAuthor(_) => "DeleteAuthor",
            BookAction::AddGenre(_) => "AddGenre",
            BookAction::DeleteGenre(_) => "DeleteGenre",
        }
    }
}

/// Everything needed to create a book.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub release_year: i32,
    pub language: String,
    pub translator: Option<String>,
    pub format: BookFormat,
    pub pages: Option<u32>,
    pub image_url: Option<String>,
    pub category_id: Uuid,
    pub is_approved: bool,
    pub created_by: Option<Uuid>,
    pub author_ids: Vec<Uuid>,
    pub genre_ids: Vec<Uuid>,
}

/// A catalog book shared by every user.
#[derive(Debug, Clone)]
pub struct Book {
    pub(crate) entity: Entity<BookAction>,
    pub(crate) title: String,
    pub(crate) isbn: String,
    pub(crate) publisher: String,
    pub(crate) release_year: i32,
    pub(crate) language: String,
    pub(crate) translator: Option<String>,
    pub(crate) format: BookFormat,
    pub(crate) pages: Option<u32>,
    pub(crate) image_url: Option<String>,
    pub(crate) category_id: Uuid,
    pub(crate) is_approved: bool,
    pub(crate) created_by: Option<Uuid>,
    pub(crate) author_ids: Vec<Uuid>,
    pub(crate) genre_ids: Vec<Uuid>,
}

crate::impl_aggregate!(Book, entity, BookAction, "book");

impl Book {
    pub fn create(draft: NewBook) -> DomainResult<Self> {
        let mut author_ids: Vec<Uuid> = Vec::with_capacity(draft.author_ids.len());
        for id in draft.author_ids {
            if author_ids.contains(&id) {
                return Err(OperationNotValidError::with_context(
                    "Author is listed more than once",
                    serde_json::json!({ "authorId": id }),
                ));
            }
            author_ids.push(id);
        }
        if author_ids.is_empty() {
            return Err(OperationNotValidError::field(
                "authorIds",
                "A book needs at least one author",
            ));
        }

        let mut genre_ids: Vec<Uuid> = Vec::new();
        for id in draft.genre_ids {
            if !genre_ids.contains(&id) {
                genre_ids.push(id);
            }
        }

        Ok(Book {
            entity: Entity::new(),
            title: validation::text("title", draft.title, 1, 256)?,
            isbn: validation::isbn(&draft.isbn)?,
            publisher: validation::text("publisher", draft.publisher, 1, 128)?,
            release_year: validation::release_year(draft.release_year)?,
            language: validation::text("language", draft.language, 1, 32)?,
            translator: validation::optional_text("translator", draft.translator, 128)?,
            format: draft.format,
            pages: validation::pages(draft.pages)?,
            image_url: validation::image_url(draft.image_url)?,
            category_id: draft.category_id,
            is_approved: draft.is_approved,
            created_by: draft.created_by,
            author_ids,
            genre_ids,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn release_year(&self) -> i32 {
        self.release_year
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn translator(&self) -> Option<&str> {
        self.translator.as_deref()
    }

    pub fn format(&self) -> BookFormat {
        self.format
    }

    pub fn pages(&self) -> Option<u32> {
        self.pages
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn is_approved(&self) -> bool {
        self.is_approved
    }

    pub fn created_by(&self) -> Option<Uuid> {
        self.created_by
    }

    pub fn author_ids(&self) -> &[Uuid] {
        &self.author_ids
    }

    pub fn genre_ids(&self) -> &[Uuid] {
        &self.genre_ids
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> DomainResult<()> {
        let title = validation::text("title", title, 1, 256)?;
        if replace_if_changed(&mut self.title, title.clone()) {
            self.entity.record(BookAction::UpdateTitle(title));
        }
        Ok(())
    }

    pub fn set_isbn(&mut self, isbn: &str) -> DomainResult<()> {
        let isbn = validation::isbn(isbn)?;
        if replace_if_changed(&mut self.isbn, isbn.clone()) {
            self.entity.record(BookAction::UpdateIsbn(isbn));
        }
        Ok(())
    }

    pub fn set_publisher(&mut self, publisher: impl Into<String>) -> DomainResult<()> {
        let publisher = validation::text("publisher", publisher, 1, 128)?;
        if replace_if_changed(&mut self.publisher, publisher.clone()) {
            self.entity.record(BookAction::UpdatePublisher(publisher));
        }
        Ok(())
    }

    pub fn set_release_year(&mut self, year: i32) -> DomainResult<()> {
        let year = validation::release_year(year)?;
        if replace_if_changed(&mut self.release_year, year) {
            self.entity.record(BookAction::UpdateReleaseYear(year));
        }
        Ok(())
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> DomainResult<()> {
        let language = validation::text("language", language, 1, 32)?;
        if replace_if_changed(&mut self.language, language.clone()) {
            self.entity.record(BookAction::UpdateLanguage(language));
        }
        Ok(())
    }

    pub fn set_translator(&mut self, translator: Option<String>) -> DomainResult<()> {
        let translator = validation::optional_text("translator", translator, 128)?;
        if replace_if_changed(&mut self.translator, translator.clone()) {
            self.entity.record(BookAction::UpdateTranslator(translator));
        }
        Ok(())
    }

    pub fn set_format(&mut self, format: BookFormat) {
        if replace_if_changed(&mut self.format, format) {
            self.entity.record(BookAction::UpdateFormat(format));
        }
    }

    pub fn set_pages(&mut self, pages: Option<u32>) -> DomainResult<()> {
        let pages = validation::pages(pages)?;
        if replace_if_changed(&mut self.pages, pages) {
            self.entity.record(BookAction::UpdatePages(pages));
        }
        Ok(())
    }

    pub fn set_image_url(&mut self, image_url: Option<String>) -> DomainResult<()> {
        let image_url = validation::image_url(image_url)?;
        if replace_if_changed(&mut self.image_url, image_url.clone()) {
            self.entity.record(BookAction::UpdateImageUrl(image_url));
        }
        Ok(())
    }

    pub fn set_category(&mut self, category_id: Uuid) {
        if replace_if_changed(&mut self.category_id, category_id) {
            self.entity.record(BookAction::UpdateCategory(category_id));
        }
    }

    pub fn set_approved(&mut self, is_approved: bool) {
        if replace_if_changed(&mut self.is_approved, is_approved) {
            self.entity.record(BookAction::UpdateIsApproved(is_approved));
        }
    }

    pub fn add_author(&mut self, author_id: Uuid) -> DomainResult<()> {
        if self.author_ids.contains(&author_id) {
            return Err(OperationNotValidError::with_context(
                "Author is already assigned to this book",
                serde_json::json!({ "bookId": self.entity.id(), "authorId": author_id }),
            ));
        }
        self.author_ids.push(author_id);
        self.entity.record(BookAction::AddAuthor(author_id));
        Ok(())
    }

    pub fn delete_author(&mut self, author_id: Uuid) -> DomainResult<()> {
        let Some(position) = self.author_ids.iter().position(|id| *id == author_id) else {
            return Err(OperationNotValidError::with_context(
                "Author is not assigned to this book",
                serde_json::json!({ "bookId": self.entity.id(), "authorId": author_id }),
            ));
        };
        if self.author_ids.len() == 1 {
            return Err(OperationNotValidError::with_context(
                "A book needs at least one author",
                serde_json::json!({ "bookId": self.entity.id(), "authorId": author_id }),
            ));
        }
        self.author_ids.remove(position);
        self.entity.record(BookAction::DeleteAuthor(author_id));
        Ok(())
    }

    /// Replace the author list, recording one action per added/removed author.
    pub fn set_authors(&mut self, desired: &[Uuid]) -> DomainResult<()> {
        if desired.is_empty() {
            return Err(OperationNotValidError::field(
                "authorIds",
                "A book needs at least one author",
            ));
        }
        let diff = reconcile(&self.author_ids, desired);
        // Add first so the "at least one author" rule holds while removing.
        for author_id in diff.to_add {
            self.add_author(author_id)?;
        }
        for author_id in diff.to_remove {
            self.delete_author(author_id)?;
        }
        Ok(())
    }

    pub fn add_genre(&mut self, genre_id: Uuid) -> DomainResult<()> {
        if self.genre_ids.contains(&genre_id) {
            return Err(OperationNotValidError::with_context(
                "Genre is already assigned to this book",
                serde_json::json!({ "bookId": self.entity.id(), "genreId": genre_id }),
            ));
        }
        self.genre_ids.push(genre_id);
        self.entity.record(BookAction::AddGenre(genre_id));
        Ok(())
    }

    pub fn delete_genre(&mut self, genre_id: Uuid) -> DomainResult<()> {
        let Some(position) = self.genre_ids.iter().position(|id| *id == genre_id) else {
            return Err(OperationNotValidError::with_context(
                "Genre is not assigned to this book",
                serde_json::json!({ "bookId": self.entity.id(), "genreId": genre_id }),
            ));
        };
        self.genre_ids.remove(position);
        self.entity.record(BookAction::DeleteGenre(genre_id));
        Ok(())
    }

    pub fn set_genres(&mut self, desired: &[Uuid]) -> DomainResult<()> {
        let diff = reconcile(&self.genre_ids, desired);
        for genre_id in diff.to_remove {
            self.delete_genre(genre_id)?;
        }
        for genre_id in diff.to_add {
            self.add_genre(genre_id)?;
        }
        Ok(())
    }

    /// Apply every field present in `changes`.
    pub fn apply_changes(&mut self, changes: &BookChanges) -> DomainResult<()> {
        if let Some(title) = &changes.title {
            self.set_title(title.clone())?;
        }
        if let Some(isbn) = &changes.isbn {
            self.set_isbn(isbn)?;
        }
        if let Some(publisher) = &changes.publisher {
            self.set_publisher(publisher.clone())?;
        }
        if let Some(year) = changes.release_year {
            self.set_release_year(year)?;
        }
        if let Some(language) = &changes.language {
            self.set_language(language.clone())?;
        }
        if let Some(translator) = &changes.translator {
            self.set_translator(Some(translator.clone()))?;
        }
        if let Some(format) = changes.format {
            self.set_format(format);
        }
        if let Some(pages) = changes.pages {
            self.set_pages(Some(pages))?;
        }
        if let Some(image_url) = &changes.image_url {
            self.set_image_url(Some(image_url.clone()))?;
        }
        if let Some(category_id) = changes.category_id {
            self.set_category(category_id);
        }
        if let Some(author_ids) = &changes.author_ids {
            self.set_authors(author_ids)?;
        }
        Ok(())
    }
}

/// The whitelisted book fields a change can touch. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookChanges {
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
    #[serde(default)]
    pub translator: Option<String>,
    #[serde(default)]
    pub format: Option<BookFormat>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub author_ids: Option<Vec<Uuid>>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        *self == BookChanges::default()
    }

    /// Keep only the fields whose value differs from `book`.
    ///
    /// Values are normalized through the same rules as the setters, so
    /// `" Lalka "` does not count as a change to `"Lalka"`. Author lists are
    /// compared as sets.
    pub fn diff_against(&self, book: &Book) -> DomainResult<BookChanges> {
        let mut diff = BookChanges::default();

        if let Some(title) = &self.title {
            let title = validation::text("title", title.clone(), 1, 256)?;
            if title != book.title {
                diff.title = Some(title);
            }
        }
        if let Some(isbn) = &self.isbn {
            let isbn = validation::isbn(isbn)?;
            if isbn != book.isbn {
                diff.isbn = Some(isbn);
            }
        }
        if let Some(publisher) = &self.publisher {
            let publisher = validation::text("publisher", publisher.clone(), 1, 128)?;
            if publisher != book.publisher {
                diff.publisher = Some(publisher);
            }
        }
        if let Some(year) = self.release_year {
            let year = validation::release_year(year)?;
            if year != book.release_year {
                diff.release_year = Some(year);
            }
        }
        if let Some(language) = &self.language {
            let language = validation::text("language", language.clone(), 1, 32)?;
            if language != book.language {
                diff.language = Some(language);
            }
        }
        if let Some(translator) = &self.translator {
            let translator = validation::text("translator", translator.clone(), 1, 128)?;
            if book.translator.as_deref() != Some(translator.as_str()) {
                diff.translator = Some(translator);
            }
        }
        if let Some(format) = self.format {
            if format != book.format {
                diff.format = Some(format);
            }
        }
        if let Some(pages) = self.pages {
            validation::pages(Some(pages))?;
            if book.pages != Some(pages) {
                diff.pages = Some(pages);
            }
        }
        if let Some(image_url) = &self.image_url {
            let image_url = validation::image_url(Some(image_url.clone()))?;
            if image_url.is_some() && image_url != book.image_url {
                diff.image_url = image_url;
            }
        }
        if let Some(category_id) = self.category_id {
            if category_id != book.category_id {
                diff.category_id = Some(category_id);
            }
        }
        if let Some(author_ids) = &self.author_ids {
            if author_ids.is_empty() {
                return Err(OperationNotValidError::field(
                    "authorIds",
                    "A book needs at least one author",
                ));
            }
            if !reconcile(&book.author_ids, author_ids).is_empty() {
                diff.author_ids = Some(author_ids.clone());
            }
        }

        Ok(diff)
    }
}
