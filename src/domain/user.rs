use serde::{Deserialize, Serialize};

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::error::DomainResult;
use super::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserAction {
    UpdateName(String),
    UpdatePassword,
}

impl DomainAction for UserAction {
    fn action_type(&self) -> &'static str {
        match self {
            UserAction::UpdateName(_) => "UpdateName",
            UserAction::UpdatePassword => "UpdatePassword",
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub(crate) entity: Entity<UserAction>,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) password_hash: String,
    pub(crate) role: Role,
}

crate::impl_aggregate!(User, entity, UserAction, "user");

impl User {
    /// `password_hash` is produced by [`crate::auth::hash_password`].
    pub fn create(email: &str, name: impl Into<String>, password_hash: String, role: Role) -> DomainResult<Self> {
        Ok(User {
            entity: Entity::new(),
            email: validation::email(email)?,
            name: validation::text("name", name, 1, 64)?,
            password_hash,
            role,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = validation::text("name", name, 1, 64)?;
        if replace_if_changed(&mut self.name, name.clone()) {
            self.entity.record(UserAction::UpdateName(name));
        }
        Ok(())
    }

    pub fn set_password_hash(&mut self, password_hash: String) {
        if replace_if_changed(&mut self.password_hash, password_hash) {
            self.entity.record(UserAction::UpdatePassword);
        }
    }
}
