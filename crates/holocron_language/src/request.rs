//! The declarative request tree.
//!
//! A [`QueryRequest`] names a root kind, optional root arguments and a
//! selection tree. Requests come from the [`parser`](crate::parser) or are
//! built programmatically:
//!
//! ```
//! use holocron_language::{ArgValue, QueryRequest, Selection};
//!
//! let request = QueryRequest::new("people")
//!     .with_argument("name", "Luke")
//!     .with_field(Selection::field("name"))
//!     .with_field(Selection::field("height").with_argument("unit", ArgValue::enumeration("METER")))
//!     .with_field(Selection::field("homeworld").with_field(Selection::field("name")));
//! assert_eq!(request.response_key(), "people");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// An argument value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// Quoted string.
    String(String),
    /// Bare enum name (e.g. `METER`).
    Enum(String),
}

impl ArgValue {
    /// Creates a bare enum value.
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Returns the text of a string or enum value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short description of the value's type, for messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Enum(_) => "enum",
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Enum(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A named argument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name.
    pub name: String,
    /// Argument value.
    pub value: ArgValue,
}

impl Argument {
    /// Creates an argument.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

fn find<'a>(arguments: &'a [Argument], name: &str) -> Option<&'a ArgValue> {
    arguments.iter().find(|a| a.name == name).map(|a| &a.value)
}

/// A selected field, possibly with its own sub-selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Response key override.
    pub alias: Option<String>,
    /// Field name.
    pub name: String,
    /// Field arguments (e.g. `unit`).
    pub arguments: Vec<Argument>,
    /// Nested fields; empty for scalar fields.
    pub selection: Vec<Selection>,
}

impl Selection {
    /// Selects a field by name.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Sets the response key.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments.push(Argument::new(name, value));
        self
    }

    /// Adds a nested field.
    #[must_use]
    pub fn with_field(mut self, field: Selection) -> Self {
        self.selection.push(field);
        self
    }

    /// Adds several nested scalar fields by name.
    #[must_use]
    pub fn with_fields<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.selection.extend(names.into_iter().map(Self::field));
        self
    }

    /// Returns the key this field appears under in the result.
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Looks up an argument by name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgValue> {
        find(&self.arguments, name)
    }
}

/// A root query: a kind designator, root arguments, and a selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Response key override.
    pub alias: Option<String>,
    /// Kind designator (`Person`, `people` or `allPeople`).
    pub root: String,
    /// Root arguments (`name`/`title` filter or `id`).
    pub arguments: Vec<Argument>,
    /// Selected fields.
    pub selection: Vec<Selection>,
}

impl QueryRequest {
    /// Starts a request for the given kind designator.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            alias: None,
            root: root.into(),
            arguments: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Sets the response key.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds a root argument.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments.push(Argument::new(name, value));
        self
    }

    /// Adds a selected field.
    #[must_use]
    pub fn with_field(mut self, field: Selection) -> Self {
        self.selection.push(field);
        self
    }

    /// Adds several scalar fields by name.
    #[must_use]
    pub fn with_fields<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.selection.extend(names.into_iter().map(Selection::field));
        self
    }

    /// Returns the key this root appears under in a document result.
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.root)
    }

    /// Looks up a root argument by name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgValue> {
        find(&self.arguments, name)
    }
}
