//! Holocron - Read-only catalog and graph query engine
//!
//! This crate re-exports all layers of the Holocron system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: holocron_runtime    — Sessions, config, snapshots, REPL, CLI
//! Layer 3: holocron_engine     — Query compiler, relationship resolver, executor
//! Layer 2: holocron_language   — Query text lexer and parser, request tree
//! Layer 1: holocron_storage    — Entity records, relationships, repository, seed
//! Layer 0: holocron_foundation — Core types (EntityId, Value, units, Error)
//! ```

pub use holocron_engine as engine;
pub use holocron_foundation as foundation;
pub use holocron_language as language;
pub use holocron_runtime as runtime;
pub use holocron_storage as storage;
