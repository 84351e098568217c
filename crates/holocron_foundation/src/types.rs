//! Type descriptors for the field schema.

use std::fmt;

use crate::entity::EntityKind;
use crate::units::Family;
use crate::value::Value;

/// Type descriptor for a selectable field.
///
/// Nullability is tracked separately by the schema, so every variant here
/// describes the non-null shape.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Opaque global identifier.
    Id,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String.
    String,
    /// RFC3339 timestamp.
    Timestamp,
    /// Ordered list of strings.
    StringList,
    /// Floating-point magnitude convertible within a unit family.
    Magnitude(Family),
    /// Single related entity.
    Entity(EntityKind),
    /// Ordered collection of related entities.
    Collection(EntityKind),
}

impl Type {
    /// Returns true if this type describes a relation.
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self, Self::Entity(_) | Self::Collection(_))
    }

    /// Checks whether a produced value has this type.
    ///
    /// `Null` is only accepted when `nullable` is set. Relations are checked
    /// structurally: an entity must be an object, a collection a list of
    /// objects.
    #[must_use]
    pub fn accepts(&self, value: &Value, nullable: bool) -> bool {
        match (self, value) {
            (_, Value::Null) => nullable,
            (Self::Id, Value::Id(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float | Self::Magnitude(_), Value::Float(_))
            | (Self::String, Value::String(_))
            | (Self::Timestamp, Value::Timestamp(_))
            | (Self::Entity(_), Value::Object(_)) => true,
            (Self::StringList, Value::List(items)) => {
                items.iter().all(|v| matches!(v, Value::String(_)))
            }
            (Self::Collection(_), Value::List(items)) => {
                items.iter().all(|v| matches!(v, Value::Object(_)))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "ID"),
            Self::Int => write!(f, "Int"),
            Self::Float => write!(f, "Float"),
            Self::String => write!(f, "String"),
            Self::Timestamp => write!(f, "Timestamp"),
            Self::StringList => write!(f, "[String]"),
            Self::Magnitude(family) => write!(f, "Float({})", family.enum_name()),
            Self::Entity(kind) => write!(f, "{kind}"),
            Self::Collection(kind) => write!(f, "[{kind}]"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
