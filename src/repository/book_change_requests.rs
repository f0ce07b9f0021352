use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::{BookChangeRequest, BookChangeRequestAction, BookChanges};
use crate::entity::{Entity, Persist};
use crate::store::{BookChangeRequestRow, Database, Paginated, Pagination, RepositoryError, Tables};

use super::repository::FindById;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookChangeRequestView {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub user_id: Uuid,
    pub changes: BookChanges,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BookChangeRequestQuery {
    pub user_id: Option<Uuid>,
    pub book_id: Option<Uuid>,
}

pub struct BookChangeRequestRepository<'a> {
    db: &'a Database,
}

fn view(row: &BookChangeRequestRow, tables: &Tables) -> BookChangeRequestView {
    BookChangeRequestView {
        id: row.id,
        book_id: row.book_id,
        book_title: tables
            .books
            .get(&row.book_id)
            .map(|book| book.title.clone())
            .unwrap_or_default(),
        user_id: row.user_id,
        changes: row.changes.clone(),
        created_at: row.created_at,
    }
}

impl<'a> BookChangeRequestRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<BookChangeRequestView>, RepositoryError> {
        self.db.read(|tables| {
            tables
                .book_change_requests
                .get(&id)
                .map(|row| view(row, tables))
        })
    }

    /// Newest first.
    pub fn find_many(
        &self,
        query: &BookChangeRequestQuery,
        pagination: Pagination,
    ) -> Result<Paginated<BookChangeRequestView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&BookChangeRequestRow> = tables
                .book_change_requests
                .iter()
                .filter(|row| query.user_id.map_or(true, |id| row.user_id == id))
                .filter(|row| query.book_id.map_or(true, |id| row.book_id == id))
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            pagination.apply(rows).map(|row| view(row, tables))
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.db
            .transaction(|tables| Ok(tables.book_change_requests.remove(&id).is_some()))
    }
}

impl FindById for BookChangeRequestRepository<'_> {
    type Aggregate = BookChangeRequest;

    fn find_by_id(&self, id: Uuid) -> Result<Option<BookChangeRequest>, RepositoryError> {
        self.db.read(|tables| {
            tables
                .book_change_requests
                .get(&id)
                .map(|row| BookChangeRequest {
                    entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
                    book_id: row.book_id,
                    user_id: row.user_id,
                    changes: row.changes.clone(),
                })
        })
    }
}

impl Persist for BookChangeRequest {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        if entity.is_new() {
            tables.books.require(&self.book_id)?;
            tables.users.require(&self.user_id)?;
            return tables.book_change_requests.insert(BookChangeRequestRow {
                id: entity.id(),
                book_id: self.book_id,
                user_id: self.user_id,
                changes: self.changes.clone(),
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }

        for action in entity.pending_actions() {
            match action {
                BookChangeRequestAction::Applied { book_id } => {
                    debug!(request = %entity.id(), book = %book_id, "change request applied");
                    tables
                        .book_change_requests
                        .check_version(entity.id(), entity.version())?;
                    tables.book_change_requests.remove(&entity.id());
                }
            }
        }
        Ok(())
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
