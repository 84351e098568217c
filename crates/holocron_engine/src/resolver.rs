//! Relationship resolution.
//!
//! Given an entity and one of its relation fields, yields the related
//! entities in link order. Forward fields read the source's targets;
//! inverse fields (e.g. `Planet.residents`) read the reverse index.

use holocron_foundation::{Error, Result};
use holocron_storage::schema::{self, RelationField};
use holocron_storage::{Catalog, Direction, Entity};

/// The entities a relation field resolves to.
#[derive(Debug)]
pub enum Resolved<'a> {
    /// A single-valued field; `None` when the entity has no target.
    One(Option<&'a Entity>),
    /// A list-valued field, possibly empty.
    Many(Vec<&'a Entity>),
}

impl<'a> Resolved<'a> {
    /// Returns the related entities as a list, whatever the cardinality.
    #[must_use]
    pub fn into_vec(self) -> Vec<&'a Entity> {
        match self {
            Self::One(entity) => entity.into_iter().collect(),
            Self::Many(entities) => entities,
        }
    }
}

/// Resolves relation fields against a catalog.
pub struct RelationshipResolver<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: Catalog + ?Sized> RelationshipResolver<'a, C> {
    /// Creates a resolver over `catalog`.
    pub const fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Resolves the relation field `name` of `entity`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRelation` if the entity's kind has no relation field
    /// with that name.
    pub fn resolve(&self, entity: &Entity, name: &str) -> Result<Resolved<'a>> {
        let field = schema::relation_field(entity.kind(), name)
            .ok_or_else(|| Error::unknown_relation(entity.kind(), name))?;
        Ok(self.resolve_field(entity, field))
    }

    /// Resolves an already validated relation field.
    ///
    /// Identifiers with no entity behind them are skipped; a single-valued
    /// field whose target is missing resolves to `One(None)`.
    #[must_use]
    pub fn resolve_field(&self, entity: &Entity, field: RelationField) -> Resolved<'a> {
        let ids = match field.direction {
            Direction::Forward => self.catalog.targets(entity.id, field.relation),
            Direction::Reverse => self.catalog.sources(entity.id, field.relation),
        };
        if field.is_single() {
            Resolved::One(ids.first().and_then(|id| self.catalog.get(*id)))
        } else {
            Resolved::Many(ids.iter().filter_map(|id| self.catalog.get(*id)).collect())
        }
    }
}
