//! Unit conversion for magnitude-bearing fields.
//!
//! Magnitudes are stored once, in the canonical unit of their family
//! (meters for lengths, kilograms for masses). Every other unit is derived
//! at read time from a fixed factor: the size of one unit expressed in the
//! canonical unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::Result;

/// The magnitude families.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Lengths, canonical unit meter.
    Length,
    /// Masses, canonical unit kilogram.
    Mass,
}

impl Family {
    /// Returns the canonical unit of this family.
    #[must_use]
    pub const fn canonical(self) -> Unit {
        match self {
            Self::Length => Unit::Length(LengthUnit::Meter),
            Self::Mass => Unit::Mass(MassUnit::Kilogram),
        }
    }

    /// Returns the enumeration name used in requests.
    #[must_use]
    pub const fn enum_name(self) -> &'static str {
        match self {
            Self::Length => "LengthUnit",
            Self::Mass => "MassUnit",
        }
    }

    /// Returns every unit of this family.
    #[must_use]
    pub fn units(self) -> Vec<Unit> {
        match self {
            Self::Length => LengthUnit::ALL.into_iter().map(Unit::Length).collect(),
            Self::Mass => MassUnit::ALL.into_iter().map(Unit::Mass).collect(),
        }
    }
}

/// Units of length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    /// 0.001 m.
    Millimeter,
    /// 0.01 m.
    Centimeter,
    /// Canonical.
    Meter,
    /// 1000 m.
    Kilometer,
    /// 0.0254 m.
    Inch,
    /// 0.3048 m.
    Foot,
    /// 0.9144 m.
    Yard,
    /// 1609.344 m.
    Mile,
}

impl LengthUnit {
    /// Every length unit.
    pub const ALL: [Self; 8] = [
        Self::Millimeter,
        Self::Centimeter,
        Self::Meter,
        Self::Kilometer,
        Self::Inch,
        Self::Foot,
        Self::Yard,
        Self::Mile,
    ];

    /// Size of one unit in meters.
    #[must_use]
    pub const fn meters(self) -> f64 {
        match self {
            Self::Millimeter => 0.001,
            Self::Centimeter => 0.01,
            Self::Meter => 1.0,
            Self::Kilometer => 1000.0,
            Self::Inch => 0.0254,
            Self::Foot => 0.3048,
            Self::Yard => 0.9144,
            Self::Mile => 1609.344,
        }
    }

    /// Returns the request spelling (e.g. `CENTIMETER`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Millimeter => "MILLIMETER",
            Self::Centimeter => "CENTIMETER",
            Self::Meter => "METER",
            Self::Kilometer => "KILOMETER",
            Self::Inch => "INCH",
            Self::Foot => "FOOT",
            Self::Yard => "YARD",
            Self::Mile => "MILE",
        }
    }

    /// Parses the request spelling.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.name() == name)
    }
}

/// Units of mass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MassUnit {
    /// 0.001 kg.
    Gram,
    /// Canonical.
    Kilogram,
    /// 1000 kg.
    MetricTon,
    /// 0.453 592 37 kg.
    Pound,
}

impl MassUnit {
    /// Every mass unit.
    pub const ALL: [Self; 4] = [Self::Gram, Self::Kilogram, Self::MetricTon, Self::Pound];

    /// Size of one unit in kilograms.
    #[must_use]
    pub const fn kilograms(self) -> f64 {
        match self {
            Self::Gram => 0.001,
            Self::Kilogram => 1.0,
            Self::MetricTon => 1000.0,
            Self::Pound => 0.453_592_37,
        }
    }

    /// Returns the request spelling (e.g. `METRIC_TON`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gram => "GRAM",
            Self::Kilogram => "KILOGRAM",
            Self::MetricTon => "METRIC_TON",
            Self::Pound => "POUND",
        }
    }

    /// Parses the request spelling.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.name() == name)
    }
}

/// A unit of either family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// A length unit.
    Length(LengthUnit),
    /// A mass unit.
    Mass(MassUnit),
}

impl Unit {
    /// Returns the family this unit measures.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Length(_) => Family::Length,
            Self::Mass(_) => Family::Mass,
        }
    }

    /// Size of one unit in the family's canonical unit.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Length(u) => u.meters(),
            Self::Mass(u) => u.kilograms(),
        }
    }

    /// Returns the request spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Length(u) => u.name(),
            Self::Mass(u) => u.name(),
        }
    }

    /// Parses a unit spelling within a family.
    ///
    /// `KILOGRAM` is not a length unit, so `parse_in(Family::Length, "KILOGRAM")`
    /// is `None`.
    #[must_use]
    pub fn parse_in(family: Family, name: &str) -> Option<Self> {
        match family {
            Family::Length => LengthUnit::parse(name).map(Self::Length),
            Family::Mass => MassUnit::parse(name).map(Self::Mass),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<LengthUnit> for Unit {
    fn from(unit: LengthUnit) -> Self {
        Self::Length(unit)
    }
}

impl From<MassUnit> for Unit {
    fn from(unit: MassUnit) -> Self {
        Self::Mass(unit)
    }
}

/// Converts a value stored in the canonical unit into `target`.
#[must_use]
pub fn convert(canonical: f64, target: Unit) -> f64 {
    canonical / target.factor()
}

/// Converts a value expressed in `unit` into the canonical unit.
#[must_use]
pub fn to_canonical(value: f64, unit: Unit) -> f64 {
    value * unit.factor()
}

/// Converts a value between two units of the same family.
///
/// # Errors
///
/// Returns an internal error if the units measure different families;
/// request validation is expected to rule that out.
pub fn convert_between(value: f64, from: Unit, to: Unit) -> Result<f64> {
    if from.family() != to.family() {
        return Err(Error::new(ErrorKind::Internal(format!(
            "cannot convert {from} to {to}"
        ))));
    }
    Ok(convert(to_canonical(value, from), to))
}
