use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::{Borrowing, BorrowingAction};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, BorrowingRow, Database, Paginated, Pagination, RepositoryError, Tables,
};

use super::repository::FindById;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingView {
    pub id: Uuid,
    pub user_book_id: Uuid,
    pub borrower: String,
    pub started_at: NaiveDate,
    pub ended_at: Option<NaiveDate>,
    pub is_open: bool,
}

impl From<&BorrowingRow> for BorrowingView {
    fn from(row: &BorrowingRow) -> Self {
        BorrowingView {
            id: row.id,
            user_book_id: row.user_book_id,
            borrower: row.borrower.clone(),
            started_at: row.started_at,
            ended_at: row.ended_at,
            is_open: row.ended_at.is_none(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BorrowingQuery {
    pub user_book_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub is_open: Option<bool>,
}

pub struct BorrowingRepository<'a> {
    db: &'a Database,
}

fn hydrate(row: &BorrowingRow) -> Borrowing {
    Borrowing {
        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
        user_book_id: row.user_book_id,
        borrower: row.borrower.clone(),
        started_at: row.started_at,
        ended_at: row.ended_at,
    }
}

impl<'a> BorrowingRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<BorrowingView>, RepositoryError> {
        self.db
            .read(|tables| tables.borrowings.get(&id).map(BorrowingView::from))
    }

    /// The borrowing of `user_book_id` that has not ended yet.
    pub fn find_open(&self, user_book_id: Uuid) -> Result<Option<Borrowing>, RepositoryError> {
        self.db.read(|tables| {
            tables
                .borrowings
                .find(|row| row.user_book_id == user_book_id && row.ended_at.is_none())
                .map(hydrate)
        })
    }

    pub fn find_many(
        &self,
        query: &BorrowingQuery,
        pagination: Pagination,
    ) -> Result<Paginated<BorrowingView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&BorrowingRow> = tables
                .borrowings
                .iter()
                .filter(|row| query.user_book_id.map_or(true, |id| row.user_book_id == id))
                .filter(|row| query.is_open.map_or(true, |open| row.ended_at.is_none() == open))
                .filter(|row| {
                    query.user_id.map_or(true, |user_id| {
                        tables
                            .user_books
                            .get(&row.user_book_id)
                            .is_some_and(|user_book| user_book.user_id == user_id)
                    })
                })
                .collect();
            rows.sort_by(|a, b| b.started_at.cmp(&a.started_at).then_with(|| a.id.cmp(&b.id)));
            pagination.apply(rows).map(BorrowingView::from)
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.db
            .transaction(|tables| Ok(tables.borrowings.remove(&id).is_some()))
    }
}

impl FindById for BorrowingRepository<'_> {
    type Aggregate = Borrowing;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Borrowing>, RepositoryError> {
        self.db.read(|tables| tables.borrowings.get(&id).map(hydrate))
    }
}

fn open_elsewhere(tables: &Tables, user_book_id: Uuid, except: Uuid) -> bool {
    tables
        .borrowings
        .any(|row| row.id != except && row.user_book_id == user_book_id && row.ended_at.is_none())
}

impl Persist for Borrowing {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        let id = entity.id();
        if entity.is_new() {
            tables.user_books.require(&self.user_book_id)?;
            if self.is_open() {
                ensure_unique(
                    open_elsewhere(tables, self.user_book_id, id),
                    "borrowings",
                    "open borrowing",
                )?;
            }
            return tables.borrowings.insert(BorrowingRow {
                id,
                user_book_id: self.user_book_id,
                borrower: self.borrower.clone(),
                started_at: self.started_at,
                ended_at: self.ended_at,
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(borrowing = %id, actions = ?self.pending_action_types(), "persisting borrowing");
        if self.is_open() {
            ensure_unique(
                open_elsewhere(tables, self.user_book_id, id),
                "borrowings",
                "open borrowing",
            )?;
        }
        tables
            .borrowings
            .update(id, entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        BorrowingAction::UpdateBorrower(borrower) => {
                            row.borrower = borrower.clone()
                        }
                        BorrowingAction::UpdateStartedAt(date) => row.started_at = *date,
                        BorrowingAction::UpdateEndedAt(date) => row.ended_at = *date,
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
