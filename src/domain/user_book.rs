use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::diff::reconcile;
use super::error::{DomainResult, OperationNotValidError};
use super::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingStatus {
    ToRead,
    InProgress,
    Finished,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserBookAction {
    UpdateStatus(ReadingStatus),
    UpdateIsFavorite(bool),
    UpdateBookshelf { from: Uuid, to: Uuid },
    UpdateImageUrl(Option<String>),
    AddCollection(Uuid),
    DeleteCollection(Uuid),
}

impl DomainAction for UserBookAction {
    fn action_type(&self) -> &'static str {
        match self {
            UserBookAction::UpdateStatus(_) => "UpdateStatus",
            UserBookAction::UpdateIsFavorite(_) => "UpdateIsFavorite",
            UserBookAction::UpdateBookshelf { .. } => "UpdateBookshelf",
            UserBookAction::UpdateImageUrl(_) => "UpdateImageUrl",
            UserBookAction::AddCollection(_) => "AddCollection",
            UserBookAction::DeleteCollection(_) => "DeleteCollection",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUserBook {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub bookshelf_id: Uuid,
    pub status: ReadingStatus,
    pub is_favorite: bool,
    pub image_url: Option<String>,
    pub collection_ids: Vec<Uuid>,
}

/// A user's own copy of a catalog book, placed on one of their bookshelves.
#[derive(Debug, Clone)]
pub struct UserBook {
    pub(crate) entity: Entity<UserBookAction>,
    pub(crate) user_id: Uuid,
    pub(crate) book_id: Uuid,
    pub(crate) bookshelf_id: Uuid,
    pub(crate) status: ReadingStatus,
    pub(crate) is_favorite: bool,
    pub(crate) image_url: Option<String>,
    pub(crate) collection_ids: Vec<Uuid>,
}

crate::impl_aggregate!(UserBook, entity, UserBookAction, "user_book");

impl UserBook {
    pub fn create(draft: NewUserBook) -> DomainResult<Self> {
        let mut collection_ids = Vec::new();
        for id in draft.collection_ids {
            if !collection_ids.contains(&id) {
                collection_ids.push(id);
            }
        }

        Ok(UserBook {
            entity: Entity::new(),
            user_id: draft.user_id,
            book_id: draft.book_id,
            bookshelf_id: draft.bookshelf_id,
            status: draft.status,
            is_favorite: draft.is_favorite,
            image_url: validation::image_url(draft.image_url)?,
            collection_ids,
        })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn book_id(&self) -> Uuid {
        self.book_id
    }

    pub fn bookshelf_id(&self) -> Uuid {
        self.bookshelf_id
    }

    pub fn status(&self) -> ReadingStatus {
        self.status
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn collection_ids(&self) -> &[Uuid] {
        &self.collection_ids
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn set_status(&mut self, status: ReadingStatus) {
        if replace_if_changed(&mut self.status, status) {
            self.entity.record(UserBookAction::UpdateStatus(status));
        }
    }

    pub fn set_favorite(&mut self, is_favorite: bool) {
        if replace_if_changed(&mut self.is_favorite, is_favorite) {
            self.entity.record(UserBookAction::UpdateIsFavorite(is_favorite));
        }
    }

    /// Move to another bookshelf. Returns the previous shelf when it moved.
    pub fn move_to(&mut self, bookshelf_id: Uuid) -> Option<Uuid> {
        let from = self.bookshelf_id;
        if !replace_if_changed(&mut self.bookshelf_id, bookshelf_id) {
            return None;
        }
        self.entity.record(UserBookAction::UpdateBookshelf {
            from,
            to: bookshelf_id,
        });
        Some(from)
    }

    pub fn set_image_url(&mut self, image_url: Option<String>) -> DomainResult<()> {
        let image_url = validation::image_url(image_url)?;
        if replace_if_changed(&mut self.image_url, image_url.clone()) {
            self.entity.record(UserBookAction::UpdateImageUrl(image_url));
        }
        Ok(())
    }

    pub fn add_collection(&mut self, collection_id: Uuid) -> DomainResult<()> {
        if self.collection_ids.contains(&collection_id) {
            return Err(OperationNotValidError::with_context(
                "Book is already in this collection",
                serde_json::json!({ "userBookId": self.entity.id(), "collectionId": collection_id }),
            ));
        }
        self.collection_ids.push(collection_id);
        self.entity.record(UserBookAction::AddCollection(collection_id));
        Ok(())
    }

    pub fn delete_collection(&mut self, collection_id: Uuid) -> DomainResult<()> {
        let Some(position) = self.collection_ids.iter().position(|id| *id == collection_id) else {
            return Err(OperationNotValidError::with_context(
                "Book is not in this collection",
                serde_json::json!({ "userBookId": self.entity.id(), "collectionId": collection_id }),
            ));
        };
        self.collection_ids.remove(position);
        self.entity.record(UserBookAction::DeleteCollection(collection_id));
        Ok(())
    }

    pub fn set_collections(&mut self, desired: &[Uuid]) -> DomainResult<()> {
        let diff = reconcile(&self.collection_ids, desired);
        for collection_id in diff.to_remove {
            self.delete_collection(collection_id)?;
        }
        for collection_id in diff.to_add {
            self.add_collection(collection_id)?;
        }
        Ok(())
    }
}
