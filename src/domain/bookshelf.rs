use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::error::{DomainResult, OperationNotValidError};
use super::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookshelfType {
    Standard,
    Borrowing,
    Archive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookshelfAction {
    UpdateName(String),
    UpdateImageUrl(Option<String>),
}

impl DomainAction for BookshelfAction {
    fn action_type(&self) -> &'static str {
        match self {
            BookshelfAction::UpdateName(_) => "UpdateName",
            BookshelfAction::UpdateImageUrl(_) => "UpdateImageUrl",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bookshelf {
    pub(crate) entity: Entity<BookshelfAction>,
    pub(crate) user_id: Uuid,
    pub(crate) name: String,
    pub(crate) bookshelf_type: BookshelfType,
    pub(crate) image_url: Option<String>,
}

crate::impl_aggregate!(Bookshelf, entity, BookshelfAction, "bookshelf");

impl Bookshelf {
    pub fn create(
        user_id: Uuid,
        name: impl Into<String>,
        bookshelf_type: BookshelfType,
        image_url: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Bookshelf {
            entity: Entity::new(),
            user_id,
            name: validation::text("name", name, 1, 64)?,
            bookshelf_type,
            image_url: validation::image_url(image_url)?,
        })
    }

    /// The shelves every account starts with.
    pub fn defaults_for(user_id: Uuid) -> DomainResult<Vec<Self>> {
        Ok(vec![
            Bookshelf::create(user_id, "Archive", BookshelfType::Archive, None)?,
            Bookshelf::create(user_id, "Borrowing", BookshelfType::Borrowing, None)?,
        ])
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bookshelf_type(&self) -> BookshelfType {
        self.bookshelf_type
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn is_standard(&self) -> bool {
        self.bookshelf_type == BookshelfType::Standard
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = validation::text("name", name, 1, 64)?;
        if name == self.name {
            return Ok(());
        }
        if !self.is_standard() {
            return Err(OperationNotValidError::with_context(
                "Only standard bookshelves can be renamed",
                serde_json::json!({ "bookshelfId": self.entity.id(), "type": self.bookshelf_type }),
            ));
        }
        self.name = name.clone();
        self.entity.record(BookshelfAction::UpdateName(name));
        Ok(())
    }

    pub fn set_image_url(&mut self, image_url: Option<String>) -> DomainResult<()> {
        let image_url = validation::image_url(image_url)?;
        if replace_if_changed(&mut self.image_url, image_url.clone()) {
            self.entity.record(BookshelfAction::UpdateImageUrl(image_url));
        }
        Ok(())
    }

    pub fn ensure_deletable(&self) -> DomainResult<()> {
        if !self.is_standard() {
            return Err(OperationNotValidError::with_context(
                "Only standard bookshelves can be deleted",
                serde_json::json!({ "bookshelfId": self.entity.id(), "type": self.bookshelf_type }),
            ));
        }
        Ok(())
    }
}
