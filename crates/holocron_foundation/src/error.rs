//! Error types for the Holocron system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::entity::{EntityId, EntityKind};

/// The main error type for Holocron operations.
#[derive(Debug, Error)]
#[error("{kind}{}", path_suffix(.path.as_deref()))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Dotted request path of the offending field, when there is one
    /// (e.g. `people.homeworld.diameter`).
    pub path: Option<String>,
}

fn path_suffix(path: Option<&str>) -> String {
    path.map(|p| format!(" (at {p})")).unwrap_or_default()
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, path: None }
    }

    /// Attaches the request path of the offending field.
    #[must_use]
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns true if this error rejects a request before execution.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnknownKind(_)
                | ErrorKind::UnknownField { .. }
                | ErrorKind::UnknownArgument { .. }
                | ErrorKind::InvalidArgument { .. }
                | ErrorKind::UnsupportedUnit { .. }
                | ErrorKind::MalformedFilter(_)
                | ErrorKind::MissingSelection(_)
                | ErrorKind::UnexpectedSelection(_)
                | ErrorKind::DuplicateField(_)
                | ErrorKind::LimitExceeded(_)
        )
    }

    /// Creates an unknown root kind error.
    #[must_use]
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownKind(name.into()))
    }

    /// Creates an unknown field error.
    #[must_use]
    pub fn unknown_field(kind: EntityKind, field: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownField {
            kind,
            field: field.into(),
        })
    }

    /// Creates an unknown relation error.
    #[must_use]
    pub fn unknown_relation(kind: EntityKind, relation: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRelation {
            kind,
            relation: relation.into(),
        })
    }

    /// Creates an unknown argument error.
    #[must_use]
    pub fn unknown_argument(field: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownArgument {
            field: field.into(),
            argument: argument.into(),
        })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        })
    }

    /// Creates an unsupported unit error.
    #[must_use]
    pub fn unsupported_unit(field: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedUnit {
            field: field.into(),
            unit: unit.into(),
        })
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates an internal invariant violation.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The root designator names no entity kind.
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    /// The field does not exist on the entity kind.
    #[error("unknown field {field} on {kind}")]
    UnknownField {
        /// The kind that was queried.
        kind: EntityKind,
        /// The field name that was not found.
        field: String,
    },

    /// The relation does not exist on the entity kind.
    #[error("unknown relation {relation} on {kind}")]
    UnknownRelation {
        /// The kind that was queried.
        kind: EntityKind,
        /// The relation name that was not found.
        relation: String,
    },

    /// The field does not accept the argument.
    #[error("unknown argument {argument} on field {field}")]
    UnknownArgument {
        /// The field the argument was given to.
        field: String,
        /// The argument name.
        argument: String,
    },

    /// The argument value has the wrong shape.
    #[error("invalid argument {argument}: {message}")]
    InvalidArgument {
        /// The argument name.
        argument: String,
        /// What was wrong with it.
        message: String,
    },

    /// The unit is not a member of the field's unit family.
    #[error("unsupported unit {unit} for field {field}")]
    UnsupportedUnit {
        /// The magnitude field.
        field: String,
        /// The rejected unit spelling.
        unit: String,
    },

    /// The name/title filter cannot be used.
    #[error("malformed filter: {0}")]
    MalformedFilter(String),

    /// A relation field was selected without a nested selection.
    #[error("relation field {0} requires a selection")]
    MissingSelection(String),

    /// A scalar field was given a nested selection.
    #[error("scalar field {0} cannot have a selection")]
    UnexpectedSelection(String),

    /// Two fields in one selection share a response key.
    #[error("duplicate field in selection: {0}")]
    DuplicateField(String),

    /// Semantic limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// Parse error in query text.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// Two entities were loaded with the same identifier.
    #[error("duplicate entity: {0}")]
    DuplicateEntity(EntityId),

    /// A single-valued relation was given a second target.
    #[error("cardinality violation: {source_id} already has a {relation} target")]
    CardinalityViolation {
        /// The relation name.
        relation: String,
        /// The source entity.
        source_id: EntityId,
    },

    /// The seed document is inconsistent.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// Configuration could not be read or is invalid.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Semantic limits that a request can exceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Selection nested deeper than the configured maximum.
    MaxDepth {
        /// The configured limit.
        limit: usize,
    },
    /// Filter string longer than the configured maximum.
    MaxFilterLength {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDepth { limit } => write!(f, "max selection depth ({limit}) exceeded"),
            Self::MaxFilterLength { limit } => {
                write!(f, "max filter length ({limit}) exceeded")
            }
        }
    }
}
