//! Query execution.
//!
//! Runs a [`CompiledQuery`] against any [`Catalog`]. The root selector picks
//! an ordered candidate list; each candidate is projected through the
//! selection set, recursing into relation fields. The output mirrors the
//! request: absent scalars and single relations are `null`, absent
//! collections are empty lists.

use tracing::{debug, error};

use holocron_foundation::{Error, Result, Type, Value, units};
use holocron_storage::{Catalog, Entity};

use crate::cache::ResolutionCache;
use crate::config::EngineConfig;
use crate::query::{
    CompiledDocument, CompiledField, CompiledQuery, FieldPlan, RootSelector, SelectionSet,
};
use crate::resolver::{RelationshipResolver, Resolved};

/// Executes compiled queries.
pub struct QueryExecutor;

impl QueryExecutor {
    /// Executes one compiled query.
    ///
    /// Returns a list of objects, or a single object (or `null`) for an
    /// `id` lookup.
    ///
    /// # Errors
    ///
    /// Only internal invariant violations fail; gaps in the data never do.
    pub fn execute<C: Catalog + ?Sized>(
        query: &CompiledQuery,
        catalog: &C,
        config: &EngineConfig,
    ) -> Result<Value> {
        Execution::new(catalog, config).run(query)
    }

    /// Executes every root of a document, sharing one memo cache.
    ///
    /// The result is an object keyed by each root's response key, in
    /// request order.
    ///
    /// # Errors
    ///
    /// Only internal invariant violations fail.
    pub fn execute_document<C: Catalog + ?Sized>(
        document: &CompiledDocument,
        catalog: &C,
        config: &EngineConfig,
    ) -> Result<Value> {
        let mut execution = Execution::new(catalog, config);
        let mut fields = Vec::with_capacity(document.roots.len());
        for query in &document.roots {
            fields.push((query.key.clone(), execution.run(query)?));
        }
        Ok(Value::object(fields))
    }
}

struct Execution<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    resolver: RelationshipResolver<'a, C>,
    cache: Option<ResolutionCache>,
}

impl<'a, C: Catalog + ?Sized> Execution<'a, C> {
    fn new(catalog: &'a C, config: &EngineConfig) -> Self {
        Self {
            catalog,
            resolver: RelationshipResolver::new(catalog),
            cache: config.memoize.then(ResolutionCache::new),
        }
    }

    fn run(&mut self, query: &CompiledQuery) -> Result<Value> {
        let catalog = self.catalog;
        let result = match &query.root {
            RootSelector::ById(id) => match catalog.get(*id) {
                Some(entity) => self.project(entity, &query.selection)?,
                None => Value::Null,
            },
            RootSelector::All => self.project_all(&catalog.all(query.kind), &query.selection)?,
            RootSelector::Filter(needle) => {
                self.project_all(&catalog.find_by_name(query.kind, needle), &query.selection)?
            }
        };

        if let Some(cache) = &self.cache {
            debug!(
                root = %query.kind,
                hits = cache.hits(),
                misses = cache.misses(),
                "executed query"
            );
        } else {
            debug!(root = %query.kind, "executed query");
        }
        Ok(result)
    }

    fn project_all(&mut self, entities: &[&Entity], selection: &SelectionSet) -> Result<Value> {
        let mut items = Vec::with_capacity(entities.len());
        for entity in entities {
            items.push(self.project(entity, selection)?);
        }
        Ok(Value::list(items))
    }

    /// Assembles the object for `entity` under `selection`.
    fn project(&mut self, entity: &Entity, selection: &SelectionSet) -> Result<Value> {
        if let Some(hit) = self
            .cache
            .as_mut()
            .and_then(|cache| cache.get(entity.id, selection.id))
        {
            return Ok(hit);
        }

        let mut fields = Vec::with_capacity(selection.fields.len());
        for field in &selection.fields {
            fields.push((field.key.clone(), self.field_value(entity, field)?));
        }
        let object = Value::object(fields);

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(entity.id, selection.id, object.clone());
        }
        Ok(object)
    }

    fn field_value(&mut self, entity: &Entity, field: &CompiledField) -> Result<Value> {
        match &field.plan {
            FieldPlan::Scalar(read) => Ok(read(entity)),
            FieldPlan::Magnitude { read, unit } => {
                if field.def.ty != Type::Magnitude(unit.family()) {
                    error!(
                        field = field.def.name,
                        unit = unit.name(),
                        "unit family does not match field"
                    );
                    return Err(Error::internal(format!(
                        "unit {} cannot express field {}",
                        unit.name(),
                        field.def.name
                    )));
                }
                Ok(read(entity).map_or(Value::Null, |canonical| {
                    Value::Float(units::convert(canonical, *unit))
                }))
            }
            FieldPlan::Relation {
                field: relation,
                selection,
            } => match self.resolver.resolve_field(entity, *relation) {
                Resolved::One(Some(target)) => self.project(target, selection),
                Resolved::One(None) => Ok(Value::Null),
                Resolved::Many(targets) => self.project_all(&targets, selection),
            },
        }
    }
}
