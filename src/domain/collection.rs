use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::error::DomainResult;
use super::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollectionAction {
    UpdateName(String),
}

impl DomainAction for CollectionAction {
    fn action_type(&self) -> &'static str {
        match self {
            CollectionAction::UpdateName(_) => "UpdateName",
        }
    }
}

/// A user-defined grouping of user books, independent of bookshelves.
#[derive(Debug, Clone)]
pub struct Collection {
    pub(crate) entity: Entity<CollectionAction>,
    pub(crate) user_id: Uuid,
    pub(crate) name: String,
}

crate::impl_aggregate!(Collection, entity, CollectionAction, "collection");

impl Collection {
    pub fn create(user_id: Uuid, name: impl Into<String>) -> DomainResult<Self> {
        Ok(Collection {
            entity: Entity::new(),
            user_id,
            name: validation::text("name", name, 1, 64)?,
        })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = validation::text("name", name, 1, 64)?;
        if replace_if_changed(&mut self.name, name.clone()) {
            self.entity.record(CollectionAction::UpdateName(name));
        }
        Ok(())
    }
}
