use serde::Serialize;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::author::normalize_name;
use crate::domain::{Category, Genre};
use crate::entity::{Entity, Persist};
use crate::store::{
    ensure_unique, CategoryRow, Database, GenreRow, Paginated, Pagination, RepositoryError, Tables,
};

use super::repository::{contains_ci, FindById};

/// Categories and genres share the same shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub id: Uuid,
    pub name: String,
}

macro_rules! catalog_repository {
    ($repo:ident, $aggregate:ident, $row:ident, $table:ident) => {
        pub struct $repo<'a> {
            db: &'a Database,
        }

        impl<'a> $repo<'a> {
            pub(crate) fn new(db: &'a Database) -> Self {
                Self { db }
            }

            pub fn find_by_name(&self, name: &str) -> Result<Option<$aggregate>, RepositoryError> {
                let wanted = normalize_name(name);
                self.db.read(|tables| {
                    tables
                        .$table
                        .find(|row| normalize_name(&row.name) == wanted)
                        .map(|row| $aggregate {
                            entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
                            name: row.name.clone(),
                        })
                })
            }

            pub fn find_many(
                &self,
                name: Option<&str>,
                pagination: Pagination,
            ) -> Result<Paginated<CatalogView>, RepositoryError> {
                self.db.read(|tables| {
                    let mut rows: Vec<&$row> = tables
                        .$table
                        .iter()
                        .filter(|row| name.map_or(true, |name| contains_ci(&row.name, name)))
                        .collect();
                    rows.sort_by_key(|row| row.name.to_lowercase());
                    pagination.apply(rows).map(|row| CatalogView {
                        id: row.id,
                        name: row.name.clone(),
                    })
                })
            }

            pub fn missing(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, RepositoryError> {
                self.db.read(|tables| {
                    ids.iter()
                        .filter(|id| !tables.$table.contains(id))
                        .copied()
                        .collect()
                })
            }
        }

        impl FindById for $repo<'_> {
            type Aggregate = $aggregate;

            fn find_by_id(&self, id: Uuid) -> Result<Option<$aggregate>, RepositoryError> {
                self.db.read(|tables| {
                    tables.$table.get(&id).map(|row| $aggregate {
                        entity: Entity::load(row.id, row.version, row.created_at, row.updated_at),
                        name: row.name.clone(),
                    })
                })
            }
        }

        impl Persist for $aggregate {
            fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError> {
                let entity = self.entity();
                if !entity.is_new() {
                    return Ok(());
                }
                let wanted = normalize_name(&self.name);
                ensure_unique(
                    tables.$table.any(|row| normalize_name(&row.name) == wanted),
                    stringify!($table),
                    "name",
                )?;
                tables.$table.insert($row {
                    id: entity.id(),
                    name: self.name.clone(),
                    version: 1,
                    created_at: entity.created_at(),
                    updated_at: entity.updated_at(),
                })
            }

            fn mark_committed(&mut self) {
                self.entity.mark_committed();
            }
        }
    };
}

catalog_repository!(CategoryRepository, Category, CategoryRow, categories);
catalog_repository!(GenreRepository, Genre, GenreRow, genres);
