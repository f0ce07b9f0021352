use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::error::DomainResult;
use super::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuoteAction {
    UpdateContent(String),
    UpdatePage(Option<String>),
    UpdateIsFavorite(bool),
}

impl DomainAction for QuoteAction {
    fn action_type(&self) -> &'static str {
        match self {
            QuoteAction::UpdateContent(_) => "UpdateContent",
            QuoteAction::UpdatePage(_) => "UpdatePage",
            QuoteAction::UpdateIsFavorite(_) => "UpdateIsFavorite",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Quote {
    pub(crate) entity: Entity<QuoteAction>,
    pub(crate) user_id: Uuid,
    pub(crate) book_id: Uuid,
    pub(crate) content: String,
    pub(crate) page: Option<String>,
    pub(crate) is_favorite: bool,
}

crate::impl_aggregate!(Quote, entity, QuoteAction, "quote");

impl Quote {
    pub fn create(
        user_id: Uuid,
        book_id: Uuid,
        content: impl Into<String>,
        page: Option<String>,
        is_favorite: bool,
    ) -> DomainResult<Self> {
        Ok(Quote {
            entity: Entity::new(),
            user_id,
            book_id,
            content: validation::text("content", content, 1, 2000)?,
            page: validation::optional_text("page", page, 32)?,
            is_favorite,
        })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn book_id(&self) -> Uuid {
        self.book_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> DomainResult<()> {
        let content = validation::text("content", content, 1, 2000)?;
        if replace_if_changed(&mut self.content, content.clone()) {
            self.entity.record(QuoteAction::UpdateContent(content));
        }
        Ok(())
    }

    pub fn set_page(&mut self, page: Option<String>) -> DomainResult<()> {
        let page = validation::optional_text("page", page, 32)?;
        if replace_if_changed(&mut self.page, page.clone()) {
            self.entity.record(QuoteAction::UpdatePage(page));
        }
        Ok(())
    }

    pub fn set_favorite(&mut self, is_favorite: bool) {
        if replace_if_changed(&mut self.is_favorite, is_favorite) {
            self.entity.record(QuoteAction::UpdateIsFavorite(is_favorite));
        }
    }
}
