//! Entity records, relationship indices, and the read-only repository for Holocron.
//!
//! This crate provides:
//! - [`Entity`] - A tagged record over the six entity kinds
//! - [`RelationshipStore`] - Ordered bidirectional relationship indices
//! - [`schema`] - The selectable field table of every kind
//! - [`Repository`] - The immutable, indexed entity store, behind [`Catalog`]
//! - [`seed`] - Bulk loading from a JSON seed document

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod relationship;
pub mod repository;
pub mod schema;
pub mod seed;

pub use entity::{Entity, EntityData, Film, Person, Planet, Species, Starship, Vehicle};
pub use relationship::{Direction, Edge, Relation, RelationshipStore};
pub use repository::{Catalog, Repository, RepositoryBuilder, Snapshot};
pub use schema::{Cardinality, FieldDef, FieldKind, RelationField};
