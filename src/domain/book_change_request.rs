use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::Entity;

use super::book::{Book, BookChanges};
use super::error::{DomainResult, OperationNotValidError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookChangeRequestAction {
    /// The changes were copied onto the book; the request is removed on commit.
    Applied { book_id: Uuid },
}

impl DomainAction for BookChangeRequestAction {
    fn action_type(&self) -> &'static str {
        match self {
            BookChangeRequestAction::Applied { .. } => "Applied",
        }
    }
}

/// A user's proposed edit of a catalog book, waiting for an admin.
#[derive(Debug, Clone)]
pub struct BookChangeRequest {
    pub(crate) entity: Entity<BookChangeRequestAction>,
    pub(crate) book_id: Uuid,
    pub(crate) user_id: Uuid,
    pub(crate) changes: BookChanges,
}

crate::impl_aggregate!(
    BookChangeRequest,
    entity,
    BookChangeRequestAction,
    "book_change_request"
);

impl BookChangeRequest {
    /// Keep exactly the proposed fields that differ from the current book.
    pub fn propose(book: &Book, proposal: &BookChanges, user_id: Uuid) -> DomainResult<Self> {
        let changes = proposal.diff_against(book)?;
        if changes.is_empty() {
            return Err(OperationNotValidError::with_context(
                "The change request does not change anything",
                serde_json::json!({ "bookId": book.entity.id() }),
            ));
        }

        Ok(BookChangeRequest {
            entity: Entity::new(),
            book_id: book.entity.id(),
            user_id,
            changes,
        })
    }

    pub fn book_id(&self) -> Uuid {
        self.book_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn changes(&self) -> &BookChanges {
        &self.changes
    }

    pub fn is_applied(&self) -> bool {
        self.entity
            .pending_actions()
            .iter()
            .any(|action| matches!(action, BookChangeRequestAction::Applied { .. }))
    }

    /// Copy the requested fields onto `book`.
    pub fn apply_to(&mut self, book: &mut Book) -> DomainResult<()> {
        if book.entity.id() != self.book_id {
            return Err(OperationNotValidError::with_context(
                "The change request belongs to another book",
                serde_json::json!({ "bookId": book.entity.id(), "requestBookId": self.book_id }),
            ));
        }
        if self.is_applied() {
            return Err(OperationNotValidError::new(
                "The change request has already been applied",
            ));
        }

        book.apply_changes(&self.changes)?;
        self.entity.record(BookChangeRequestAction::Applied {
            book_id: self.book_id,
        });
        Ok(())
    }
}
