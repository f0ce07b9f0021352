use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::error::{DomainResult, OperationNotValidError};
use super::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BorrowingAction {
    UpdateBorrower(String),
    UpdateStartedAt(NaiveDate),
    UpdateEndedAt(Option<NaiveDate>),
}

impl DomainAction for BorrowingAction {
    fn action_type(&self) -> &'static str {
        match self {
            BorrowingAction::UpdateBorrower(_) => "UpdateBorrower",
            BorrowingAction::UpdateStartedAt(_) => "UpdateStartedAt",
            BorrowingAction::UpdateEndedAt(_) => "UpdateEndedAt",
        }
    }
}

/// A user book lent to someone. Open while `ended_at` is empty.
#[derive(Debug, Clone)]
pub struct Borrowing {
    pub(crate) entity: Entity<BorrowingAction>,
    pub(crate) user_book_id: Uuid,
    pub(crate) borrower: String,
    pub(crate) started_at: NaiveDate,
    pub(crate) ended_at: Option<NaiveDate>,
}

crate::impl_aggregate!(Borrowing, entity, BorrowingAction, "borrowing");

impl Borrowing {
    pub fn create(
        user_book_id: Uuid,
        borrower: impl Into<String>,
        started_at: NaiveDate,
        ended_at: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        validation::date_range(started_at, ended_at)?;
        Ok(Borrowing {
            entity: Entity::new(),
            user_book_id,
            borrower: validation::text("borrower", borrower, 1, 128)?,
            started_at,
            ended_at,
        })
    }

    pub fn user_book_id(&self) -> Uuid {
        self.user_book_id
    }

    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    pub fn started_at(&self) -> NaiveDate {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<NaiveDate> {
        self.ended_at
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn set_borrower(&mut self, borrower: impl Into<String>) -> DomainResult<()> {
        let borrower = validation::text("borrower", borrower, 1, 128)?;
        if replace_if_changed(&mut self.borrower, borrower.clone()) {
            self.entity.record(BorrowingAction::UpdateBorrower(borrower));
        }
        Ok(())
    }

    pub fn set_started_at(&mut self, started_at: NaiveDate) -> DomainResult<()> {
        validation::date_range(started_at, self.ended_at)?;
        if replace_if_changed(&mut self.started_at, started_at) {
            self.entity.record(BorrowingAction::UpdateStartedAt(started_at));
        }
        Ok(())
    }

    /// Change both ends at once; only the resulting range has to be valid.
    pub fn set_period(&mut self, started_at: NaiveDate, ended_at: Option<NaiveDate>) -> DomainResult<()> {
        validation::date_range(started_at, ended_at)?;
        if replace_if_changed(&mut self.started_at, started_at) {
            self.entity.record(BorrowingAction::UpdateStartedAt(started_at));
        }
        if replace_if_changed(&mut self.ended_at, ended_at) {
            self.entity.record(BorrowingAction::UpdateEndedAt(ended_at));
        }
        Ok(())
    }

    pub fn set_ended_at(&mut self, ended_at: Option<NaiveDate>) -> DomainResult<()> {
        validation::date_range(self.started_at, ended_at)?;
        if replace_if_changed(&mut self.ended_at, ended_at) {
            self.entity.record(BorrowingAction::UpdateEndedAt(ended_at));
        }
        Ok(())
    }

    /// End an open borrowing. A book returned before it was lent (clock skew,
    /// back-dated records) ends on its start date.
    pub fn close(&mut self, on: NaiveDate) -> DomainResult<()> {
        if !self.is_open() {
            return Err(OperationNotValidError::with_context(
                "Borrowing is already closed",
                serde_json::json!({ "borrowingId": self.entity.id() }),
            ));
        }
        self.set_ended_at(Some(on.max(self.started_at)))
    }
}
