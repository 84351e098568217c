//! Query compilation for Holocron.
//!
//! This module provides:
//! - [`QueryCompiler`] - Validates a [`QueryRequest`] against the field schema
//! - [`CompiledQuery`] - A validated query ready for execution
//!
//! Compilation never touches a repository. Every request error (unknown
//! kinds, fields and arguments, unsupported units, malformed filters,
//! missing or unexpected sub-selections, depth limits) is raised here, with
//! the dotted path of the offending field.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use holocron_foundation::{
    EntityId, EntityKind, Error, ErrorKind, Family, Result, SemanticLimit, Unit, Value,
};
use holocron_language::{ArgValue, MAX_NESTING, QueryRequest, Selection};
use holocron_storage::schema::{self, FieldDef, FieldKind, RelationField};
use holocron_storage::Entity;

use crate::config::EngineConfig;

// =============================================================================
// Compiled Query Types
// =============================================================================

/// How the root candidates are chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RootSelector {
    /// Every entity of the kind, in load order.
    All,
    /// Case-insensitive substring match on the name (title for films).
    Filter(String),
    /// A single entity; the root yields an object or `null`.
    ById(EntityId),
}

/// How one selected field is produced.
#[derive(Clone, Debug)]
pub enum FieldPlan {
    /// Read as stored.
    Scalar(fn(&Entity) -> Value),
    /// Read in the canonical unit and converted to `unit`.
    Magnitude {
        /// Reads the canonical value.
        read: fn(&Entity) -> Option<f64>,
        /// Requested unit (or the field default).
        unit: Unit,
    },
    /// Resolve the relation and project each related entity.
    Relation {
        /// The relation side to read.
        field: RelationField,
        /// Sub-selection applied to related entities.
        selection: SelectionSet,
    },
}

/// A validated field.
#[derive(Clone, Debug)]
pub struct CompiledField {
    /// Response key (alias or field name).
    pub key: Arc<str>,
    /// Schema entry of the field.
    pub def: &'static FieldDef,
    /// How to produce the value.
    pub plan: FieldPlan,
}

/// A validated selection over one entity kind.
#[derive(Clone, Debug)]
pub struct SelectionSet {
    /// Identifier unique within a compiled document; keys the memo cache.
    pub id: usize,
    /// Kind the selection applies to.
    pub kind: EntityKind,
    /// Fields in request order.
    pub fields: Vec<CompiledField>,
}

impl SelectionSet {
    /// Returns the number of nested selection levels, counting this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .fields
            .iter()
            .filter_map(|f| match &f.plan {
                FieldPlan::Relation { selection, .. } => Some(selection.depth()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

/// A compiled root query.
#[derive(Clone, Debug)]
pub struct CompiledQuery {
    /// Response key of the root (alias or designator).
    pub key: Arc<str>,
    /// Root entity kind.
    pub kind: EntityKind,
    /// Candidate selection.
    pub root: RootSelector,
    /// Fields selected on each candidate.
    pub selection: SelectionSet,
}

/// Compiled root queries of one document, in request order.
#[derive(Clone, Debug, Default)]
pub struct CompiledDocument {
    /// Root queries.
    pub roots: Vec<CompiledQuery>,
}

// =============================================================================
// Query Compiler
// =============================================================================

/// Compiles requests into executable queries.
pub struct QueryCompiler;

impl QueryCompiler {
    /// Compiles a single root request.
    ///
    /// # Errors
    ///
    /// Returns a validation error, carrying the offending path, if the
    /// request does not fit the schema or the configured limits.
    pub fn compile(request: &QueryRequest, config: &EngineConfig) -> Result<CompiledQuery> {
        Context::new(config).compile_root(request)
    }

    /// Compiles every root of a document.
    ///
    /// Selection identifiers are unique across the document, so one memo
    /// cache can serve all roots.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, or `DuplicateField` if two roots
    /// share a response key.
    pub fn compile_document(
        requests: &[QueryRequest],
        config: &EngineConfig,
    ) -> Result<CompiledDocument> {
        let mut cx = Context::new(config);
        let mut keys = HashSet::new();
        let mut roots = Vec::with_capacity(requests.len());
        for request in requests {
            let key = request.response_key();
            if !keys.insert(key) {
                return Err(Error::new(ErrorKind::DuplicateField(key.to_string())).at_path(key));
            }
            roots.push(cx.compile_root(request)?);
        }
        Ok(CompiledDocument { roots })
    }
}

struct Context<'a> {
    config: &'a EngineConfig,
    next_id: usize,
}

impl<'a> Context<'a> {
    const fn new(config: &'a EngineConfig) -> Self {
        Self { config, next_id: 0 }
    }

    fn compile_root(&mut self, request: &QueryRequest) -> Result<CompiledQuery> {
        let path = request.root.as_str();
        let kind = EntityKind::from_designator(&request.root)
            .ok_or_else(|| Error::unknown_kind(&request.root).at_path(path))?;
        let root = self.root_selector(kind, request).map_err(|e| e.at_path(path))?;
        if request.selection.is_empty() {
            return Err(Error::new(ErrorKind::MissingSelection(path.to_string())).at_path(path));
        }
        let selection = self.compile_selection(kind, &request.selection, path, 1)?;
        debug!(root = %kind, depth = selection.depth(), "compiled query");
        Ok(CompiledQuery {
            key: request.response_key().into(),
            kind,
            root,
            selection,
        })
    }

    fn root_selector(&self, kind: EntityKind, request: &QueryRequest) -> Result<RootSelector> {
        let filter_name = kind.name_field();
        let mut filter = None;
        let mut id = None;
        for arg in &request.arguments {
            if arg.name == filter_name {
                filter = self.filter(&arg.value)?;
            } else if arg.name == "id" {
                id = Self::id(kind, &arg.value)?;
            } else {
                return Err(Error::unknown_argument(&request.root, &arg.name));
            }
        }
        match (id, filter) {
            (Some(_), Some(_)) => Err(Error::invalid_argument(
                "id",
                format!("cannot be combined with a {filter_name} filter"),
            )),
            (Some(id), None) => Ok(RootSelector::ById(id)),
            (None, Some(needle)) => Ok(RootSelector::Filter(needle)),
            (None, None) => Ok(RootSelector::All),
        }
    }

    fn filter(&self, value: &ArgValue) -> Result<Option<String>> {
        let needle = match value {
            ArgValue::Null => return Ok(None),
            ArgValue::String(s) => s,
            other => {
                return Err(Error::new(ErrorKind::MalformedFilter(format!(
                    "expected a string, found {}",
                    other.type_name()
                ))));
            }
        };
        if needle.chars().count() > self.config.max_filter_len {
            return Err(Error::limit_exceeded(SemanticLimit::MaxFilterLength {
                limit: self.config.max_filter_len,
            }));
        }
        if needle.chars().any(char::is_control) {
            return Err(Error::new(ErrorKind::MalformedFilter(
                "filter contains control characters".to_string(),
            )));
        }
        Ok(Some(needle.clone()))
    }

    fn id(kind: EntityKind, value: &ArgValue) -> Result<Option<EntityId>> {
        let id = match value {
            ArgValue::Null => return Ok(None),
            ArgValue::String(global) => EntityId::from_global_id(global)
                .ok_or_else(|| Error::invalid_argument("id", format!("{global:?} is not a global id")))?,
            ArgValue::Int(n) => u32::try_from(*n)
                .ok()
                .filter(|n| *n > 0)
                .map(|n| EntityId::new(kind, n))
                .ok_or_else(|| Error::invalid_argument("id", format!("{n} is out of range")))?,
            other => {
                return Err(Error::invalid_argument(
                    "id",
                    format!("expected a global id or integer, found {}", other.type_name()),
                ));
            }
        };
        if id.kind != kind {
            return Err(Error::invalid_argument(
                "id",
                format!("{id} is not a {}", kind.type_name()),
            ));
        }
        Ok(Some(id))
    }

    fn compile_selection(
        &mut self,
        kind: EntityKind,
        selection: &[Selection],
        path: &str,
        depth: usize,
    ) -> Result<SelectionSet> {
        let limit = self.config.max_depth.map_or(MAX_NESTING, |d| d.min(MAX_NESTING));
        if depth > limit {
            return Err(Error::limit_exceeded(SemanticLimit::MaxDepth { limit }).at_path(path));
        }

        let id = self.next_id;
        self.next_id += 1;

        let mut keys = HashSet::new();
        let mut fields = Vec::with_capacity(selection.len());
        for sel in selection {
            let field_path = format!("{path}.{}", sel.name);
            let key = sel.response_key();
            if !keys.insert(key) {
                return Err(
                    Error::new(ErrorKind::DuplicateField(key.to_string())).at_path(field_path)
                );
            }
            let def = schema::field(kind, &sel.name)
                .ok_or_else(|| Error::unknown_field(kind, &sel.name).at_path(&field_path))?;
            let plan = self.compile_field(def, sel, &field_path, depth)?;
            fields.push(CompiledField {
                key: key.into(),
                def,
                plan,
            });
        }

        Ok(SelectionSet { id, kind, fields })
    }

    fn compile_field(
        &mut self,
        def: &'static FieldDef,
        sel: &Selection,
        path: &str,
        depth: usize,
    ) -> Result<FieldPlan> {
        match def.kind {
            FieldKind::Scalar(read) => {
                reject_arguments(sel, &[]).map_err(|e| e.at_path(path))?;
                reject_selection(sel, path)?;
                Ok(FieldPlan::Scalar(read))
            }
            FieldKind::Magnitude { default_unit, read } => {
                reject_arguments(sel, &["unit"]).map_err(|e| e.at_path(path))?;
                reject_selection(sel, path)?;
                let unit = match sel.argument("unit") {
                    None | Some(ArgValue::Null) => default_unit,
                    Some(value) => parse_unit(def.name, default_unit.family(), value)
                        .map_err(|e| e.at_path(path))?,
                };
                Ok(FieldPlan::Magnitude { read, unit })
            }
            FieldKind::Relation(field) => {
                reject_arguments(sel, &[]).map_err(|e| e.at_path(path))?;
                if sel.selection.is_empty() {
                    return Err(
                        Error::new(ErrorKind::MissingSelection(sel.name.clone())).at_path(path)
                    );
                }
                let selection =
                    self.compile_selection(field.target_kind(), &sel.selection, path, depth + 1)?;
                Ok(FieldPlan::Relation { field, selection })
            }
        }
    }
}

fn reject_arguments(sel: &Selection, allowed: &[&str]) -> Result<()> {
    match sel
        .arguments
        .iter()
        .find(|a| !allowed.contains(&a.name.as_str()))
    {
        Some(arg) => Err(Error::unknown_argument(&sel.name, &arg.name)),
        None => Ok(()),
    }
}

fn reject_selection(sel: &Selection, path: &str) -> Result<()> {
    if sel.selection.is_empty() {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::UnexpectedSelection(sel.name.clone())).at_path(path))
    }
}

fn parse_unit(field: &str, family: Family, value: &ArgValue) -> Result<Unit> {
    let Some(name) = value.as_text() else {
        return Err(Error::invalid_argument(
            "unit",
            format!("expected a {} name, found {}", family.enum_name(), value.type_name()),
        ));
    };
    Unit::parse_in(family, name).ok_or_else(|| Error::unsupported_unit(field, name))
}
