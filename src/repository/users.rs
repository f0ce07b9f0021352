use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::{OperationNotValidError, Role, User, UserAction};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, Database, Paginated, Pagination, RepositoryError, Tables, TokenKind, TokenRow,
    UserRow,
};

use super::cascade;
use super::repository::{contains_ci, FindById, WriteError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRow> for UserView {
    fn from(row: &UserRow) -> Self {
        UserView {
            id: row.id,
            email: row.email.clone(),
            name: row.name.clone(),
            role: row.role,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
}

pub struct UserRepository<'a> {
    db: &'a Database,
}

fn hydrate(row: &UserRow) -> User {
    User {
        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
        email: row.email.clone(),
        name: row.name.clone(),
        password_hash: row.password_hash.clone(),
        role: row.role,
    }
}

impl<'a> UserRepository<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = email.trim().to_lowercase();
        self.db
            .read(|tables| tables.users.find(|row| row.email == email).map(hydrate))
    }

    pub fn find_view(&self, id: Uuid) -> Result<Option<UserView>, RepositoryError> {
        self.db
            .read(|tables| tables.users.get(&id).map(UserView::from))
    }

    pub fn find_many(
        &self,
        query: &UserQuery,
        pagination: Pagination,
    ) -> Result<Paginated<UserView>, RepositoryError> {
        self.db.read(|tables| {
            let mut rows: Vec<&UserRow> = tables
                .users
                .iter()
                .filter(|row| {
                    query
                        .email
                        .as_deref()
                        .map_or(true, |email| contains_ci(&row.email, email))
                })
                .filter(|row| {
                    query
                        .name
                        .as_deref()
                        .map_or(true, |name| contains_ci(&row.name, name))
                })
                .filter(|row| query.role.map_or(true, |role| row.role == role))
                .collect();
            rows.sort_by(|a, b| a.email.cmp(&b.email));
            pagination.apply(rows).map(UserView::from)
        })
    }

    /// Store a token hash. Expired tokens of the same user are pruned.
    pub fn issue_token(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        self.db.transaction(|tables| {
            tables.users.require(&user_id)?;
            let now = Utc::now();
            tables
                .tokens
                .retain(|_, token| token.user_id != user_id || token.expires_at > now);
            tables.tokens.insert(
                hash.clone(),
                TokenRow {
                    hash,
                    user_id,
                    kind,
                    expires_at,
                },
            );
            Ok(())
        })
    }

    pub fn find_token(&self, hash: &str) -> Result<Option<TokenRow>, RepositoryError> {
        self.db.read(|tables| tables.tokens.get(hash).cloned())
    }

    pub fn revoke_token(&self, hash: &str) -> Result<bool, RepositoryError> {
        self.db
            .transaction(|tables| Ok(tables.tokens.remove(hash).is_some()))
    }

    pub fn revoke_user_tokens(&self, user_id: Uuid) -> Result<usize, RepositoryError> {
        self.db.transaction(|tables| {
            let before = tables.tokens.len();
            tables.tokens.retain(|_, token| token.user_id != user_id);
            Ok(before - tables.tokens.len())
        })
    }

    /// Delete the user and everything they own. The last admin stays.
    pub fn delete(&self, id: Uuid) -> Result<bool, WriteError> {
        self.db.transaction(|tables| {
            let Some(row) = tables.users.get(&id) else {
                return Ok(false);
            };
            if row.role == Role::Admin
                && tables.users.iter().filter(|row| row.role == Role::Admin).count() <= 1
            {
                return Err(OperationNotValidError::with_context(
                    "The last admin account cannot be deleted",
                    serde_json::json!({ "userId": id }),
                )
                .into());
            }
            Ok(cascade::delete_user(tables, id))
        })
    }
}

impl FindById for UserRepository<'_> {
    type Aggregate = User;

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        self.db.read(|tables| tables.users.get(&id).map(hydrate))
    }
}

impl Persist for User {
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
        let entity = self.entity();
        if entity.is_new() {
            ensure_unique(
                tables.users.any(|row| row.email == self.email),
                "users",
                "email",
            )?;
            return tables.users.insert(UserRow {
                id: entity.id(),
                email: self.email.clone(),
                name: self.name.clone(),
                password_hash: self.password_hash.clone(),
                role: self.role,
                version: 1,
                created_at: entity.created_at(),
                updated_at: entity.updated_at(),
            });
        }
        if entity.pending_actions().is_empty() {
            return Ok(());
        }

        debug!(user = %entity.id(), actions = ?self.pending_action_types(), "persisting user");
        tables
            .users
            .update(entity.id(), entity.version(), entity.updated_at(), |row| {
                for action in entity.pending_actions() {
                    match action {
                        UserAction::UpdateName(name) => row.name = name.clone(),
                        UserAction::UpdatePassword => {
                            row.password_hash = self.password_hash.clone()
                        }
                    }
                }
            })
    }

    fn mark_committed(&mut self) {
        self.entity.mark_committed();
    }
}
