use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::{Quote, QuoteAction};
use crate::entity::{Entity, Persist};
use crate::store::{Database, Paginated, Pagination, QuoteRow, RepositoryError, Tables};

use super::repository::{contains_ci, FindById};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub content: String,
    pub page: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct QuoteQuery {
    pub user_id: Option<Uuid>,
    pub book_id: Option<Uuid>,
    pub is_favorite: Option<bool>,
    pub content: Option<String>,
}

pub struct QuoteRepository<'a> {
    db: &'a Database,
}

fn view(row: &QuoteRow, tables: &Tables) -> QuoteView {
    QuoteView {
        id: row.id,
        user_id: row.user_id,
        book_id: row.book_id,
        book_title: tables
            .books
            .get(&row.book_id)
            .map(|book| book.title.clone())
            .unwrap_or_default(),
        content: row.content.clone(),
        page: row.page.clone(),
        is_favorite: row.is_favorite,
        created_at: row.created_at,
    }
}

impl<'a> QuoteRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<QuoteView>, RepositoryError> {
        self.db
            .read(|tables| tables.quotes.get(&id).map(|row| view(row, tables)))
    }

    /// Newest first.
    pub fn find_many(
        &self,
        query: &QuoteQuery,
        pagination: Pagination,
    ) -> Result<Paginated<QuoteView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&QuoteRow> = tables
                .quotes
                .iter()
                .filter(|row| query.user_id.map_or(true, |id| row.user_id == id))
                .filter(|row| query.book_id.map_or(true, |id| row.book_id == id))
                .filter(|row| query.is_favorite.map_or(true, |favorite| row.is_favorite == favorite))
                .filter(|row| {
                    query
                        .content
                        .as_deref()
                        .map_or(true, |content| contains_ci(&row.content, content))
                })
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
            pagination.apply(rows).map(|row| view(row, tables))
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.db
            .transaction(|tables| Ok(tables.quotes.remove(&id).is_some()))
    }
}

impl FindById for QuoteRepository<'_> {
    type Aggregate = Quote;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, RepositoryError> {
        self.db.read(|tables| {
            tables.quotes.get(&id).map(|row| Quote {
                entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
                user_id: row.user_id,
                book_id: row.book_id,
                content: row.content.clone(),
                page: row.page.clone(),
                is_favorite: row.is_favorite,
            })
        })
    }
}

impl Persist for Quote {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        if entity.is_new() {
            tables.users.require(&self.user_id)?;
            tables.books.require(&self.book_id)?;
            return tables.quotes.insert(QuoteRow {
                id: entity.id(),
                user_id: self.user_id,
                book_id: self.book_id,
                content: self.content.clone(),
                page: self.page.clone(),
                is_favorite: self.is_favorite,
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(quote = %entity.id(), actions = ?self.pending_action_types(), "persisting quote");
        tables
            .quotes
            .update(entity.id(), entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        QuoteAction::UpdateContent(content) => row.content = content.clone(),
                        QuoteAction::UpdatePage(page) => row.page = page.clone(),
                        QuoteAction::UpdateIsFavorite(favorite) => row.is_favorite = *favorite,
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
