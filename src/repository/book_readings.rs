use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::{BookReading, BookReadingAction};
use crate::entity::{Entity, Persist};
use crate::store::{BookReadingRow, Database, Paginated, Pagination, RepositoryError, Tables};

use super::repository::FindById;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReadingView {
    pub id: Uuid,
    pub user_book_id: Uuid,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub started_at: NaiveDate,
    pub ended_at: Option<NaiveDate>,
}

impl From<&BookReadingRow> for BookReadingView {
    fn from(row: &BookReadingRow) -> Self {
        BookReadingView {
            id: row.id,
            user_book_id: row.user_book_id,
            rating: row.rating,
            comment: row.comment.clone(),
            started_at: row.started_at,
            ended_at: row.ended_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookReadingQuery {
    pub user_book_id: Option<Uuid>,
    /// Only readings of user books owned by this user.
    pub user_id: Option<Uuid>,
}

pub struct BookReadingRepository<'a> {
    db: &'a Database,
}

impl<'a> BookReadingRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<BookReadingView>, RepositoryError> {
        self.db
            .read(|tables| tables.book_readings.get(&id).map(BookReadingView::from))
    }

    /// Most recent reading first.
    pub fn find_many(
        &self,
        query: &BookReadingQuery,
        pagination: Pagination,
    ) -> Result<Paginated<BookReadingView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&BookReadingRow> = tables
                .book_readings
                .iter()
                .filter(|row| query.user_book_id.map_or(true, |id| row.user_book_id == id))
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
            pagination.apply(rows).map(BookReadingView::from)
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.db
            .transaction(|tables| Ok(tables.book_readings.remove(&id).is_some()))
    }
}

impl FindById for BookReadingRepository<'_> {
    type Aggregate = BookReading;

    fn find_by_id(&self, id: Uuid) -> Result<Option<BookReading>, RepositoryError> {
        self.db.read(|tables| {
            tables.book_readings.get(&id).map(|row| BookReading {
                entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
                user_book_id: row.user_book_id,
                rating: row.rating,
                comment: row.comment.clone(),
                started_at: row.started_at,
                ended_at: row.ended_at,
            })
        })
    }
}

impl Persist for BookReading {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        if entity.is_new() {
            tables.user_books.require(&self.user_book_id)?;
            return tables.book_readings.insert(BookReadingRow {
                id: entity.id(),
                user_book_id: self.user_book_id,
                rating: self.rating,
                comment: self.comment.clone(),
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

        debug!(reading = %entity.id(), actions = ?self.pending_action_types(), "persisting book reading");
        tables
            .book_readings
            .update(entity.id(), entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        BookReadingAction::UpdateRating(rating) => row.rating = *rating,
                        BookReadingAction::UpdateComment(comment) => row.comment = comment.clone(),
                        BookReadingAction::UpdateStartedAt(date) => row.started_at = *date,
                        BookReadingAction::UpdateEndedAt(date) => row.ended_at = *date,
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
