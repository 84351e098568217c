//! Query compilation, relationship resolution, and execution for Holocron.
//!
//! This crate provides:
//! - [`QueryCompiler`] - Validates a request against the field schema
//! - [`RelationshipResolver`] - Resolves one relation edge set of an entity
//! - [`QueryExecutor`] - Runs compiled queries against a [`Catalog`](holocron_storage::Catalog)
//! - [`ResolutionCache`] - Per-execution memo of assembled entity objects
//! - [`EngineConfig`] - Depth, filter and memoization limits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod config;
pub mod executor;
pub mod query;
pub mod resolver;

pub use cache::ResolutionCache;
pub use config::EngineConfig;
pub use executor::QueryExecutor;
pub use query::{
    CompiledDocument, CompiledField, CompiledQuery, FieldPlan, QueryCompiler, RootSelector,
    SelectionSet,
};
pub use resolver::{RelationshipResolver, Resolved};
