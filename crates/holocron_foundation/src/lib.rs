//! Core types, values, units, and errors for Holocron.
//!
//! This crate provides:
//! - [`EntityKind`] and [`EntityId`] - Kind-partitioned entity identifiers
//! - [`Value`] - The result tree produced by query execution
//! - [`Type`] - Type descriptors for the field schema
//! - [`units`] - Length and mass conversion from canonical units
//! - [`Error`] - Rich error types with the offending request path

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod types;
pub mod units;
pub mod value;

pub use entity::{EntityId, EntityKind};
pub use error::{Error, ErrorKind, SemanticLimit};
pub use types::Type;
pub use units::{Family, LengthUnit, MassUnit, Unit};
pub use value::Value;

/// Result type alias using the Holocron error type.
pub type Result<T> = std::result::Result<T, Error>;
