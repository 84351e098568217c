//! Session state for the CLI and REPL.
//!
//! A session holds a shared, immutable repository and the engine
//! configuration, and answers text or programmatic queries against them.
//! Sessions are cheap to clone; clones share the repository.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use holocron_engine::{EngineConfig, QueryCompiler, QueryExecutor};
use holocron_foundation::{EntityKind, Error, ErrorKind, Result, Value};
use holocron_language::{QueryRequest, parse};
use holocron_storage::schema::{self, FieldKind};
use holocron_storage::seed::{load_bundled, load_seed_file};
use holocron_storage::Repository;

use crate::config::RuntimeConfig;
use crate::serialize::load_snapshot;

/// A loaded repository plus the limits applied to its queries.
#[derive(Clone, Debug)]
pub struct Session {
    /// The shared repository.
    repo: Arc<Repository>,

    /// Query limits.
    config: EngineConfig,
}

impl Session {
    /// Creates a session over `repo` with the default engine configuration.
    #[must_use]
    pub fn new(repo: Arc<Repository>) -> Self {
        Self {
            repo,
            config: EngineConfig::default(),
        }
    }

    /// Creates a session over the bundled seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled seed fails to load.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(Arc::new(load_bundled()?)))
    }

    /// Loads the repository named by `config`: the snapshot if set, else the
    /// seed file if set, else the bundled seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen source cannot be read or loaded.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let repo = if let Some(path) = &config.snapshot_path {
            load_snapshot(path)?
        } else if let Some(path) = &config.data_path {
            load_seed_file(path)?
        } else {
            load_bundled()?
        };
        Ok(Self::new(Arc::new(repo)).with_config(config.engine.clone()))
    }

    /// Sets the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the shared repository.
    #[must_use]
    pub const fn repository(&self) -> &Arc<Repository> {
        &self.repo
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses, validates and executes a query document.
    ///
    /// The result is an object keyed by each root's alias or designator.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error; nothing is read from the
    /// repository unless the whole document is valid.
    pub fn query(&self, source: &str) -> Result<Value> {
        let requests = parse(source)?;
        let document = QueryCompiler::compile_document(&requests, &self.config)?;
        debug!(roots = document.roots.len(), "running document");
        QueryExecutor::execute_document(&document, self.repo.as_ref(), &self.config)
    }

    /// Validates and executes a single programmatic request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the request does not fit the schema.
    pub fn run(&self, request: &QueryRequest) -> Result<Value> {
        let query = QueryCompiler::compile(request, &self.config)?;
        QueryExecutor::execute(&query, self.repo.as_ref(), &self.config)
    }

    /// Runs a query document and renders the result as JSON.
    ///
    /// # Errors
    ///
    /// Returns the query's error, or `SerializationError` if rendering fails.
    pub fn query_json(&self, source: &str, pretty: bool) -> Result<String> {
        to_json(&self.query(source)?, pretty)
    }

    /// Describes the selectable fields of `kind`, one per line.
    ///
    /// Non-null fields end in `!`; magnitude fields show their unit
    /// argument and its default.
    #[must_use]
    pub fn describe(&self, kind: EntityKind) -> String {
        let mut out = format!("type {kind} {{\n");
        for field in schema::fields(kind) {
            let bang = if field.nullable { "" } else { "!" };
            match field.kind {
                FieldKind::Magnitude { default_unit, .. } => {
                    out.push_str(&format!(
                        "  {}(unit: {} = {}): {}{bang}\n",
                        field.name,
                        default_unit.family().enum_name(),
                        default_unit.name(),
                        field.ty
                    ));
                }
                _ => out.push_str(&format!("  {}: {}{bang}\n", field.name, field.ty)),
            }
        }
        out.push('}');
        out
    }

    /// Returns entity and edge counts.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            counts: EntityKind::ALL
                .into_iter()
                .map(|kind| (kind, self.repo.len(kind)))
                .collect(),
            edges: self.repo.edge_count(),
        }
    }

    /// Returns every root designator and field name, for completion.
    #[must_use]
    pub fn vocabulary(&self) -> Vec<String> {
        let mut words: Vec<String> = EntityKind::ALL
            .into_iter()
            .flat_map(|kind| {
                [kind.type_name(), kind.collection(), kind.all_name()]
                    .into_iter()
                    .chain(schema::fields(kind).iter().map(|f| f.name))
            })
            .map(String::from)
            .collect();
        words.sort();
        words.dedup();
        words
    }
}

/// Renders a result as JSON.
///
/// # Errors
///
/// Returns `SerializationError` if rendering fails.
pub fn to_json(value: &Value, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Entity and edge counts of a session's repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStats {
    /// Entity count per kind, in kind order.
    pub counts: Vec<(EntityKind, usize)>,
    /// Stored edge count.
    pub edges: usize,
}

impl SessionStats {
    /// Total number of entities.
    #[must_use]
    pub fn entities(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, count) in &self.counts {
            writeln!(f, "{:<10} {count}", kind.collection())?;
        }
        write!(f, "{:<10} {}", "edges", self.edges)
    }
}
