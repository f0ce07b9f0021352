use serde::{Deserialize, Serialize};

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::error::DomainResult;
use super::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuthorAction {
    UpdateName(String),
    UpdateIsApproved(bool),
}

impl DomainAction for AuthorAction {
    fn action_type(&self) -> &'static str {
        match self {
            AuthorAction::UpdateName(_) => "UpdateName",
            AuthorAction::UpdateIsApproved(_) => "UpdateIsApproved",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Author {
    pub(crate) entity: Entity<AuthorAction>,
    pub(crate) name: String,
    pub(crate) is_approved: bool,
}

crate::impl_aggregate!(Author, entity, AuthorAction, "author");

impl Author {
    pub fn create(name: impl Into<String>, is_approved: bool) -> DomainResult<Self> {
        Ok(Author {
            entity: Entity::new(),
            name: validation::text("name", name, 1, 128)?,
            is_approved,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_approved(&self) -> bool {
        self.is_approved
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = validation::text("name", name, 1, 128)?;
        if replace_if_changed(&mut self.name, name.clone()) {
            self.entity.record(AuthorAction::UpdateName(name));
        }
        Ok(())
    }

    pub fn set_approved(&mut self, is_approved: bool) {
        if replace_if_changed(&mut self.is_approved, is_approved) {
            self.entity.record(AuthorAction::UpdateIsApproved(is_approved));
        }
    }
}

/// Lowercased, whitespace-collapsed name used to match authors.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
