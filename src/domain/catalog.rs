//! Admin-managed catalog vocabularies: categories and genres.

use crate::aggregate::DomainAction;
use crate::entity::Entity;

use super::error::DomainResult;
use super::validation;

/// Catalog entries are immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {}

impl DomainAction for CatalogAction {
    fn action_type(&self) -> &'static str {
        match *self {}
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub(crate) entity: Entity<CatalogAction>,
    pub(crate) name: String,
}

crate::impl_aggregate!(Category, entity, CatalogAction, "category");

impl Category {
    pub fn create(name: impl Into<String>) -> DomainResult<Self> {
        Ok(Category {
            entity: Entity::new(),
            name: validation::text("name", name, 1, 64)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct Genre {
    pub(crate) entity: Entity<CatalogAction>,
    pub(crate) name: String,
}

crate::impl_aggregate!(Genre, entity, CatalogAction, "genre");

impl Genre {
    pub fn create(name: impl Into<String>) -> DomainResult<Self> {
        Ok(Genre {
            entity: Entity::new(),
            name: validation::text("name", name, 1, 64)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
